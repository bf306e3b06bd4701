//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Identifier assigned by the store
    pub id: Uuid,
    #[schema(example = "The Great Gatsby")]
    pub title: String,
    #[schema(example = "F. Scott Fitzgerald")]
    pub author: String,
    #[serde(rename = "ISBN")]
    #[schema(example = "9780744066868")]
    pub isbn: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "The Great Gatsby")]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    #[schema(example = "F. Scott Fitzgerald")]
    pub author: String,
    #[serde(rename = "ISBN")]
    #[validate(length(min = 1, message = "ISBN is required"))]
    #[schema(example = "9780744066868")]
    pub isbn: String,
}

/// Update book request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    #[serde(rename = "ISBN")]
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: Option<String>,
}

impl UpdateBook {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.isbn.is_none()
    }

    /// Apply the present fields to `book`
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(ref title) = self.title {
            book.title = title.clone();
        }
        if let Some(ref author) = self.author {
            book.author = author.clone();
        }
        if let Some(ref isbn) = self.isbn {
            book.isbn = isbn.clone();
        }
    }
}
