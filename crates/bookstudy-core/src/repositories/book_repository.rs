//! Book repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Book, BookChanges};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books, newest first.
    async fn list(&self) -> Result<Vec<Book>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Book>, DomainError>;
    async fn create(&self, book: &Book) -> Result<Book, DomainError>;
    /// Apply `changes`; `None` when the book does not exist.
    async fn update(&self, id: &Uuid, changes: &BookChanges) -> Result<Option<Book>, DomainError>;
    /// Delete a book with its sections and chunks; `false` when nothing was deleted.
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), DomainError>;
}
