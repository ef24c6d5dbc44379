//! HTML page handlers

use axum::{
    extract::State,
    response::{Html, Redirect},
};

use crate::{
    error::PageResult,
    models::book::{BookForm, RatingForm},
    views, AppState,
};

use super::{PagePath, ValidatedForm};

/// Library page
pub async fn list_books(State(state): State<AppState>) -> PageResult<Html<String>> {
    let books = state.services.library.list_books().await?;
    Ok(Html(views::index(&books)))
}

pub async fn add_book_form() -> Html<String> {
    Html(views::add_form())
}

/// Store a new book and go back to the library
pub async fn add_book(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<BookForm>,
) -> PageResult<Redirect> {
    let data = form.into_new_book()?;
    state.services.library.add_book(data).await?;
    Ok(Redirect::to("/"))
}

pub async fn edit_book_form(
    State(state): State<AppState>,
    PagePath(id): PagePath<i64>,
) -> PageResult<Html<String>> {
    let book = state.services.library.get_book(id).await?;
    Ok(Html(views::edit_form(&book)))
}

pub async fn edit_book(
    State(state): State<AppState>,
    PagePath(id): PagePath<i64>,
    ValidatedForm(form): ValidatedForm<RatingForm>,
) -> PageResult<Redirect> {
    let rating = form.rating()?;
    state.services.library.update_rating(id, rating).await?;
    Ok(Redirect::to("/"))
}

/// Delete is POST-only; `GET /delete/:id` answers 405
pub async fn delete_book(
    State(state): State<AppState>,
    PagePath(id): PagePath<i64>,
) -> PageResult<Redirect> {
    state.services.library.delete_book(id).await?;
    Ok(Redirect::to("/"))
}
