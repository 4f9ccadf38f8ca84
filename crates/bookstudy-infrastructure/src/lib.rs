//! # Book Study Infrastructure
//!
//! PostgreSQL repository implementations and the external EPUB parser adapter.

pub mod database;
pub mod epub;

pub use database::{create_pool, run_migrations, PgBookRepository, PgChunkRepository, PgSectionRepository};
pub use epub::ProcessEpubParser;
