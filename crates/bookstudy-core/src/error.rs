//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Book not found: {0}")]
    BookNotFound(Uuid),

    #[error("Section not found: {0}")]
    SectionNotFound(Uuid),

    #[error("Section {section_id} does not belong to book {book_id}")]
    SectionNotInBook { section_id: Uuid, book_id: Uuid },

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The book already has sections or chunks and the caller did not
    /// confirm the replacement.
    #[error("Book already has {section_count} sections and {chunk_count} chunks")]
    ExistingContent {
        section_count: i64,
        chunk_count: i64,
        toc_text: Option<String>,
    },

    #[error("toc_text is empty")]
    EmptyToc,

    #[error("No sections parsed")]
    NoSectionsParsed,

    #[error("EPUB parsing failed: {0}")]
    EpubParseError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
