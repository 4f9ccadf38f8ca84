//! Domain services (business logic)

pub mod book_service;
pub mod chunk_service;
pub mod epub_service;
pub mod toc_service;

pub use book_service::BookService;
pub use chunk_service::{ChunkService, IngestOutcome, IngestRequest};
pub use epub_service::{EpubImportOutcome, EpubImportService};
pub use toc_service::{TocImportOutcome, TocImportService};
