//! Book model and form payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

/// Maximum length of title and author, in characters
pub const MAX_TEXT_LEN: usize = 250;

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    /// Unique across the library
    pub title: String,
    pub author: String,
    pub rating: f64,
}

/// Validated data for a book about to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub rating: f64,
}

/// Add-book form as submitted by the browser
#[derive(Debug, Deserialize, Validate)]
pub struct BookForm {
    #[validate(custom(function = "validate_text"))]
    pub book_name: String,
    #[validate(custom(function = "validate_text"))]
    pub book_author: String,
    #[validate(custom(function = "validate_rating"))]
    pub book_rating: String,
}

impl BookForm {
    pub fn into_new_book(self) -> AppResult<NewBook> {
        Ok(NewBook {
            title: self.book_name.trim().to_string(),
            author: self.book_author.trim().to_string(),
            rating: parse_rating(&self.book_rating)?,
        })
    }
}

/// Edit-rating form
#[derive(Debug, Deserialize, Validate)]
pub struct RatingForm {
    #[validate(custom(function = "validate_rating"))]
    pub new_rating: String,
}

impl RatingForm {
    pub fn rating(&self) -> AppResult<f64> {
        parse_rating(&self.new_rating)
    }
}

/// Parse a rating submitted as text. Any finite number is accepted.
pub fn parse_rating(raw: &str) -> AppResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AppError::Validation(format!(
            "Rating must be a number, got '{}'",
            raw
        ))),
    }
}

fn validate_text(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("required").with_message("must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::new("length")
            .with_message(format!("must be at most {} characters", MAX_TEXT_LEN).into()));
    }
    Ok(())
}

fn validate_rating(value: &str) -> Result<(), ValidationError> {
    parse_rating(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("rating").with_message("must be a number".into()))
}
