//! In-process book store, used for local runs and tests

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{duplicate_isbn, BookStore};
use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
};

/// Records kept in insertion order. ISBN uniqueness is enforced under the
/// write lock, mirroring the unique index of the PostgreSQL schema.
#[derive(Default)]
pub struct InMemoryBookStore {
    books: RwLock<IndexMap<Uuid, Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn insert(&self, data: &CreateBook) -> AppResult<Book> {
        let mut books = self.books.write().await;
        if books.values().any(|b| b.isbn == data.isbn) {
            return Err(duplicate_isbn(&data.isbn));
        }

        let now = Utc::now();
        let book = Book {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            author: data.author.clone(),
            isbn: data.isbn.clone(),
            created_at: now,
            updated_at: now,
        };
        books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.values().find(|b| b.isbn == isbn).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        let books = self.books.read().await;
        Ok(books.values().filter(|b| b.title == title).cloned().collect())
    }

    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Option<Book>> {
        let mut books = self.books.write().await;
        if !books.contains_key(&id) {
            return Ok(None);
        }
        if let Some(ref isbn) = data.isbn {
            if books.values().any(|b| b.id != id && &b.isbn == isbn) {
                return Err(duplicate_isbn(isbn));
            }
        }

        let Some(book) = books.get_mut(&id) else {
            return Ok(None);
        };
        data.apply_to(book);
        book.updated_at = Utc::now();
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.books.write().await.shift_remove(&id))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn new_book(title: &str, isbn: &str) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author: "Author".to_string(),
            isbn: isbn.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = InMemoryBookStore::new();
        for (i, title) in ["c", "a", "b"].iter().enumerate() {
            store.insert(&new_book(title, &i.to_string())).await.unwrap();
        }
        let titles: Vec<_> = store.list().await.unwrap().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_insert_enforces_unique_isbn() {
        let store = InMemoryBookStore::new();
        store.insert(&new_book("One", "111")).await.unwrap();
        let err = store.insert(&new_book("Two", "111")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_absent() {
        let store = InMemoryBookStore::new();
        let updated = store.update(Uuid::new_v4(), &UpdateBook::default()).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_id_with_taken_isbn_is_absent() {
        let store = InMemoryBookStore::new();
        store.insert(&new_book("One", "111")).await.unwrap();
        let update = UpdateBook {
            isbn: Some("111".to_string()),
            ..Default::default()
        };
        let updated = store.update(Uuid::new_v4(), &update).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_update_to_taken_isbn_conflicts() {
        let store = InMemoryBookStore::new();
        store.insert(&new_book("One", "111")).await.unwrap();
        let other = store.insert(&new_book("Two", "222")).await.unwrap();
        let update = UpdateBook {
            isbn: Some("111".to_string()),
            ..Default::default()
        };
        let err = store.update(other.id, &update).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn test_update_to_own_isbn_is_allowed() {
        let store = InMemoryBookStore::new();
        let book = store.insert(&new_book("One", "111")).await.unwrap();
        let update = UpdateBook {
            isbn: Some("111".to_string()),
            ..Default::default()
        };
        let updated = store.update(book.id, &update).await.unwrap().unwrap();
        assert_eq!(updated.isbn, "111");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let store = InMemoryBookStore::new();
        let book = store.insert(&new_book("One", "111")).await.unwrap();
        assert_eq!(store.delete(book.id).await.unwrap(), Some(book.clone()));
        assert_eq!(store.delete(book.id).await.unwrap(), None);
    }
}
