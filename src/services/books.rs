//! Book access layer

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::{duplicate_isbn, BookStore},
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
}

/// Ids that are not well-formed cannot name a record, so they read as absent
fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| not_found(id))
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Create a book, rejecting ISBNs that already exist.
    ///
    /// The lookup is only a fast path: concurrent creates are settled by the
    /// store's own uniqueness constraint, which reports the same error.
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;

        if self.store.find_by_isbn(&data.isbn).await?.is_some() {
            tracing::info!("Rejected book with duplicate ISBN {}", data.isbn);
            return Err(duplicate_isbn(&data.isbn));
        }

        let book = self.store.insert(data).await?;
        tracing::info!(book_id = %book.id, "Created book");
        Ok(book)
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.store.list().await
    }

    pub async fn find_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        self.store.find_by_title(title).await
    }

    /// Apply the present fields of `data`. ISBN uniqueness is not re-checked here.
    pub async fn update(&self, id: &str, data: &UpdateBook) -> AppResult<Book> {
        data.validate()?;
        let uuid = parse_id(id)?;

        let book = self
            .store
            .update(uuid, data)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(book_id = %book.id, "Updated book");
        Ok(book)
    }

    /// Hard delete; returns the removed record
    pub async fn delete(&self, id: &str) -> AppResult<Book> {
        let uuid = parse_id(id)?;

        let book = self.store.delete(uuid).await?.ok_or_else(|| not_found(id))?;
        tracing::info!(book_id = %book.id, "Deleted book");
        Ok(book)
    }

    /// Store connectivity, for readiness checks
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
