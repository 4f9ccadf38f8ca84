use std::sync::Arc;

use bookstudy_core::services::{BookService, ChunkService, EpubImportService, TocImportService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<BookService>,
    pub toc_service: Arc<TocImportService>,
    pub chunk_service: Arc<ChunkService>,
    pub epub_service: Arc<EpubImportService>,
    /// Request body cap, sized for EPUB uploads.
    pub max_upload_bytes: usize,
}
