//! Book domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
};

impl Repository {
    /// List all books in insertion order
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT id, title, author, rating FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID, `None` if absent
    pub async fn books_find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>("SELECT id, title, author, rating FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Create book. Fails with `Conflict` when the title is already taken.
    pub async fn books_create(&self, data: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, rating)
            VALUES (?, ?, ?)
            RETURNING id, title, author, rating
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(format!("A book titled '{}' already exists", data.title))
            }
            other => AppError::Database(other),
        })
    }

    /// Overwrite the rating of a book
    pub async fn books_update_rating(&self, id: i64, rating: f64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "UPDATE books SET rating = ? WHERE id = ? RETURNING id, title, author, rating",
        )
        .bind(rating)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Delete book
    pub async fn books_delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
