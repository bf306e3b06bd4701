//! Storage layer for book records

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::{
    config::{DatabaseConfig, StoreBackend},
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

pub use books::PgBookStore;
pub use memory::InMemoryBookStore;

/// Capability interface over the book entity store.
///
/// Absence is reported as `None`/empty, never as an error. Errors are reserved
/// for duplicate keys and storage failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a record and return it with its assigned id.
    /// Fails with [`AppError::DuplicateKey`] if the ISBN is already taken.
    async fn insert(&self, data: &CreateBook) -> AppResult<Book>;

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// All records in store-native order
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Exact, case-sensitive title match
    async fn find_by_title(&self, title: &str) -> AppResult<Vec<Book>>;

    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Option<Book>>;

    async fn delete(&self, id: Uuid) -> AppResult<Option<Book>>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Open the store selected by configuration, running migrations for PostgreSQL
pub async fn open(config: &DatabaseConfig) -> AppResult<Arc<dyn BookStore>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory book store; records are lost on shutdown");
            Ok(Arc::new(InMemoryBookStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .connect(&config.url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| AppError::StorageUnavailable(format!("migration failed: {}", e)))?;

            tracing::info!("Database migrations completed");

            Ok(Arc::new(PgBookStore::new(pool)))
        }
    }
}

pub(crate) fn duplicate_isbn(isbn: &str) -> AppError {
    AppError::DuplicateKey(format!("A book with ISBN {} already exists", isbn))
}
