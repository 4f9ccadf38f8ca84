// ============================================================================
// Book Study Core - TOC Import Service
// File: crates/bookstudy-core/src/services/toc_service.rs
// Description: Confirm-before-destroy TOC import and section queries
// ============================================================================
//! TOC import.
//!
//! Importing replaces every section (and, through them, every chunk) of a
//! book. When the book already has content the import is refused with the
//! current counts unless the caller passes `force`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Book, BookChanges, BookContentCounts, FlatSection, Section, SectionNode};
use crate::error::DomainError;
use crate::processing::{build_section_tree, parse_toc};
use crate::repositories::{BookRepository, ChunkRepository, SectionRepository};

/// Result of a successful import. The counts describe the content that
/// existed before it was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TocImportOutcome {
    pub created: usize,
    pub section_count: i64,
    pub chunk_count: i64,
}

pub struct TocImportService {
    books: Arc<dyn BookRepository>,
    sections: Arc<dyn SectionRepository>,
    chunks: Arc<dyn ChunkRepository>,
}

impl TocImportService {
    pub fn new(
        books: Arc<dyn BookRepository>,
        sections: Arc<dyn SectionRepository>,
        chunks: Arc<dyn ChunkRepository>,
    ) -> Self {
        Self {
            books,
            sections,
            chunks,
        }
    }

    /// Optionally store new TOC text on the book, then import the stored text.
    pub async fn import_stored(
        &self,
        book_id: Uuid,
        toc_text: Option<String>,
        force: bool,
    ) -> Result<TocImportOutcome, DomainError> {
        let book = self.require_book(book_id).await?;

        let book = match toc_text {
            Some(text) => self
                .books
                .update(&book_id, &BookChanges::toc_text_only(&text))
                .await?
                .ok_or(DomainError::BookNotFound(book_id))?,
            None => book,
        };

        let text = book.usable_toc_text().ok_or(DomainError::EmptyToc)?;
        self.import_text(book_id, text, force).await
    }

    /// Parse `toc_text` and replace the book's sections with the result.
    pub async fn import_text(
        &self,
        book_id: Uuid,
        toc_text: &str,
        force: bool,
    ) -> Result<TocImportOutcome, DomainError> {
        let parsed = parse_toc(toc_text, book_id);
        if parsed.is_empty() {
            return Err(DomainError::NoSectionsParsed);
        }

        let counts = self.content_counts(book_id).await?;
        if counts.has_existing() && !force {
            warn!(
                "Refusing TOC import for book {}: {} sections and {} chunks exist",
                book_id, counts.section_count, counts.chunk_count
            );
            return Err(DomainError::ExistingContent {
                section_count: counts.section_count,
                chunk_count: counts.chunk_count,
                toc_text: None,
            });
        }

        self.sections.replace_for_book(&book_id, &parsed).await?;
        info!(
            "Imported {} sections for book {} (replaced {} sections, {} chunks)",
            parsed.len(),
            book_id,
            counts.section_count,
            counts.chunk_count
        );

        Ok(TocImportOutcome {
            created: parsed.len(),
            section_count: counts.section_count,
            chunk_count: counts.chunk_count,
        })
    }

    pub async fn content_counts(&self, book_id: Uuid) -> Result<BookContentCounts, DomainError> {
        Ok(BookContentCounts {
            section_count: self.sections.count_by_book(&book_id).await?,
            chunk_count: self.chunks.count_by_book(&book_id).await?,
        })
    }

    pub async fn list_sections(&self, book_id: Uuid) -> Result<Vec<Section>, DomainError> {
        self.require_book(book_id).await?;
        self.sections.list_by_book(&book_id).await
    }

    pub async fn section_tree(&self, book_id: Uuid) -> Result<Vec<SectionNode>, DomainError> {
        let sections = self.list_sections(book_id).await?;
        let flat: Vec<FlatSection> = sections.iter().map(FlatSection::from).collect();
        Ok(build_section_tree(&flat))
    }

    async fn require_book(&self, book_id: Uuid) -> Result<Book, DomainError> {
        self.books
            .find_by_id(&book_id)
            .await?
            .ok_or(DomainError::BookNotFound(book_id))
    }
}
