//! Chunk repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Chunk, NewChunk};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ChunkRepository: Send + Sync {
    /// Chunks of a book ordered by section then `chunk_index`, optionally
    /// restricted to one section.
    async fn list_by_book(
        &self,
        book_id: &Uuid,
        section_id: Option<Uuid>,
    ) -> Result<Vec<Chunk>, DomainError>;
    async fn count_by_book(&self, book_id: &Uuid) -> Result<i64, DomainError>;
    /// Highest `chunk_index` stored for the section, `None` when it has no chunks.
    async fn max_chunk_index(&self, section_id: &Uuid) -> Result<Option<i32>, DomainError>;
    /// Insert all chunks in one statement; returns the number of rows written.
    async fn insert_many(&self, chunks: &[NewChunk]) -> Result<u64, DomainError>;
}
