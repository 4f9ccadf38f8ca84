//! PostgreSQL repository implementations

pub mod book_repo_impl;
pub mod chunk_repo_impl;
pub mod section_repo_impl;

pub use book_repo_impl::PgBookRepository;
pub use chunk_repo_impl::PgChunkRepository;
pub use section_repo_impl::PgSectionRepository;

use bookstudy_core::error::DomainError;
use tracing::error;

/// Postgres bind parameters are capped at 65535 per statement.
pub(crate) const INSERT_BATCH_ROWS: usize = 1000;

pub(crate) fn database_error(context: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}
