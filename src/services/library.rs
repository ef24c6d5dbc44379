//! Library service: the operations behind every book route

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct LibraryService {
    repository: Repository,
}

impl LibraryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books_list().await
    }

    pub async fn find_book(&self, id: i64) -> AppResult<Option<Book>> {
        self.repository.books_find_by_id(id).await
    }

    /// Get book by ID, `NotFound` if absent
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.find_book(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub async fn add_book(&self, data: NewBook) -> AppResult<Book> {
        let book = self.repository.books_create(&data).await?;
        tracing::info!(id = book.id, title = %book.title, "Book added");
        Ok(book)
    }

    pub async fn update_rating(&self, id: i64, rating: f64) -> AppResult<Book> {
        let book = self.repository.books_update_rating(id, rating).await?;
        tracing::info!(id, rating, "Book rating updated");
        Ok(book)
    }

    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books_delete(id).await?;
        tracing::info!(id, "Book deleted");
        Ok(())
    }

    /// Check that the database answers
    pub async fn check_database(&self) -> AppResult<()> {
        self.repository
            .ping()
            .await
            .map_err(|e| AppError::Unavailable(format!("Database unreachable: {}", e)))
    }
}
