// ============================================================================
// Book Study Core - Book Entity
// File: crates/bookstudy-core/src/domain/book.rs
// Description: Book entity and partial-update changes
// ============================================================================

use bookstudy_shared::constants::DEFAULT_BOOK_LANGUAGE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// Book entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Book {
    pub id: Uuid,

    #[validate(length(min = 1, max = 500, message = "title must be between 1 and 500 characters"))]
    pub title: String,

    pub author: Option<String>,

    #[validate(length(min = 1, max = 35, message = "language must be between 1 and 35 characters"))]
    pub language: String,

    /// Raw table-of-contents text the sections are parsed from.
    pub toc_text: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Book {
    pub fn new(
        title: &str,
        author: Option<&str>,
        language: Option<&str>,
    ) -> Result<Self, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::ValidationError("title is required".to_string()));
        }

        let book = Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: author.and_then(normalize_optional),
            language: normalize_language(language),
            toc_text: None,
            created_at: Utc::now(),
        };

        book.validate()?;
        Ok(book)
    }

    /// Trimmed TOC text, or `None` when nothing usable is stored.
    pub fn usable_toc_text(&self) -> Option<&str> {
        self.toc_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Partial update of a book. `author: Some(None)` clears the author.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<Option<String>>,
    pub language: Option<String>,
    pub toc_text: Option<String>,
}

impl BookChanges {
    pub fn new(
        title: Option<&str>,
        author: Option<&str>,
        language: Option<&str>,
        toc_text: Option<&str>,
    ) -> Result<Self, DomainError> {
        let title = match title.map(str::trim) {
            Some("") => {
                return Err(DomainError::ValidationError("title is required".to_string()));
            }
            Some(title) => Some(title.to_string()),
            None => None,
        };

        let changes = Self {
            title,
            author: author.map(normalize_optional),
            language: language.map(|value| normalize_language(Some(value))),
            toc_text: toc_text.map(str::to_string),
        };

        if changes.is_empty() {
            return Err(DomainError::ValidationError("No fields to update".to_string()));
        }
        Ok(changes)
    }

    pub fn toc_text_only(toc_text: &str) -> Self {
        Self {
            toc_text: Some(toc_text.to_string()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.language.is_none()
            && self.toc_text.is_none()
    }

    pub fn apply(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(language) = &self.language {
            book.language = language.clone();
        }
        if let Some(toc_text) = &self.toc_text {
            book.toc_text = Some(toc_text.clone());
        }
    }
}

/// Existing persisted content of a book, checked before a destructive re-parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BookContentCounts {
    pub section_count: i64,
    pub chunk_count: i64,
}

impl BookContentCounts {
    pub fn has_existing(&self) -> bool {
        self.section_count > 0 || self.chunk_count > 0
    }
}

fn normalize_optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn normalize_language(value: Option<&str>) -> String {
    value
        .and_then(normalize_optional)
        .unwrap_or_else(|| DEFAULT_BOOK_LANGUAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_book_trims_and_defaults() {
        let book = Book::new("  Deep Work ", Some("  "), None).unwrap();
        assert_eq!(book.title, "Deep Work");
        assert_eq!(book.author, None);
        assert_eq!(book.language, "ko");
        assert!(book.toc_text.is_none());
    }

    #[test]
    fn test_create_book_requires_title() {
        assert!(matches!(
            Book::new("   ", None, None),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn test_changes_reject_blank_title_and_empty_patch() {
        assert!(BookChanges::new(Some(" "), None, None, None).is_err());
        assert!(BookChanges::new(None, None, None, None).is_err());
    }

    #[test]
    fn test_changes_apply() {
        let mut book = Book::new("Title", Some("Someone"), Some("en")).unwrap();
        let changes = BookChanges::new(None, Some(""), Some(" "), Some("1 Intro")).unwrap();
        changes.apply(&mut book);

        assert_eq!(book.author, None);
        assert_eq!(book.language, "ko");
        assert_eq!(book.toc_text.as_deref(), Some("1 Intro"));
        assert_eq!(book.usable_toc_text(), Some("1 Intro"));
    }

    #[test]
    fn test_usable_toc_text_ignores_blank() {
        let mut book = Book::new("Title", None, None).unwrap();
        book.toc_text = Some(" \n\t ".to_string());
        assert_eq!(book.usable_toc_text(), None);
    }

    #[test]
    fn test_content_counts() {
        assert!(!BookContentCounts::default().has_existing());
        assert!(BookContentCounts { section_count: 0, chunk_count: 3 }.has_existing());
    }
}
