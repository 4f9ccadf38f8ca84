//! Section repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Section;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Sections of a book ordered by `order_index`.
    async fn list_by_book(&self, book_id: &Uuid) -> Result<Vec<Section>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Section>, DomainError>;
    async fn count_by_book(&self, book_id: &Uuid) -> Result<i64, DomainError>;

    /// Atomically delete every chunk and section of the book, then insert
    /// `sections`. Nothing changes when any step fails.
    async fn replace_for_book(&self, book_id: &Uuid, sections: &[Section]) -> Result<u64, DomainError>;
}
