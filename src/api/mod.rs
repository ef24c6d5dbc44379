//! HTTP layer: HTML pages, read-only JSON API and documentation

pub mod books;
pub mod health;
pub mod openapi;
pub mod pages;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    routing::{get, post},
    Form, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use validator::{Validate, ValidationErrors};

use crate::{
    error::{AppError, PageError},
    AppState,
};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let pages = Router::new()
        .route("/", get(pages::list_books))
        .route("/add", get(pages::add_book_form).post(pages::add_book))
        .route("/edit/:id", get(pages::edit_book_form).post(pages::edit_book))
        .route("/delete/:id", post(pages::delete_book));

    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/books", get(books::list_books))
        .route("/books/:id", get(books::get_book));

    Router::new()
        .merge(pages)
        .nest("/api/v1", api_v1)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

/// Form extractor that runs `validator` checks before the handler sees the data
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        if let Err(errors) = value.validate() {
            tracing::warn!(?errors, "Validation errors");
            return Err(AppError::Validation(describe_validation_errors(&errors)).into());
        }

        Ok(ValidatedForm(value))
    }
}

/// Path extractor whose rejection renders as an HTML error page
pub struct PagePath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PagePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(PagePath(value))
    }
}

/// One `field: message` entry per invalid field, sorted by field name
fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}
