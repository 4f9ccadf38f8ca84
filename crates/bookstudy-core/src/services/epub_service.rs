// ============================================================================
// Book Study Core - EPUB Import Service
// File: crates/bookstudy-core/src/services/epub_service.rs
// Description: Uploaded EPUB -> parsed TOC -> sections through the import gate
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::BookChanges;
use crate::epub::EpubParser;
use crate::error::DomainError;
use crate::repositories::BookRepository;
use crate::services::TocImportService;

const EPUB_EXTENSION: &str = ".epub";
const PARSED_STATUS: &str = "parsed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpubImportOutcome {
    pub status: &'static str,
    pub toc_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub struct EpubImportService {
    books: Arc<dyn BookRepository>,
    toc: Arc<TocImportService>,
    parser: Arc<dyn EpubParser>,
    scratch_dir: PathBuf,
}

impl EpubImportService {
    pub fn new(
        books: Arc<dyn BookRepository>,
        toc: Arc<TocImportService>,
        parser: Arc<dyn EpubParser>,
    ) -> Self {
        Self {
            books,
            toc,
            parser,
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Directory the upload is written to while the parser runs.
    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = scratch_dir.into();
        self
    }

    pub async fn import(
        &self,
        book_id: Uuid,
        filename: &str,
        bytes: &[u8],
        force: bool,
    ) -> Result<EpubImportOutcome, DomainError> {
        if !filename.to_lowercase().ends_with(EPUB_EXTENSION) {
            return Err(DomainError::ValidationError(
                "Only .epub files are supported".to_string(),
            ));
        }
        if bytes.is_empty() {
            return Err(DomainError::ValidationError("file is empty".to_string()));
        }
        if self.books.find_by_id(&book_id).await?.is_none() {
            return Err(DomainError::BookNotFound(book_id));
        }

        let digest = hex::encode(Sha256::digest(bytes));
        info!(
            "Parsing EPUB {} ({} bytes, sha256 {}) for book {}",
            filename,
            bytes.len(),
            digest,
            book_id
        );

        let path = self
            .scratch_dir
            .join(format!("{}-{}.epub", digest, Uuid::new_v4()));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::InternalError(format!("failed to stage upload: {}", e)))?;

        let parsed = self.parser.parse(&path).await;
        if let Err(e) = tokio::fs::remove_file(&path).await {
            debug!("Could not remove staged upload {}: {}", path.display(), e);
        }
        let parsed = parsed?;

        let toc_text = parsed.trimmed_toc().to_string();
        if toc_text.is_empty() {
            warn!("EPUB {} for book {} has no table of contents", filename, book_id);
            return Ok(EpubImportOutcome {
                status: PARSED_STATUS,
                toc_text,
                created: None,
                message: Some("No table of contents found in the EPUB".to_string()),
            });
        }

        let outcome = match self.toc.import_text(book_id, &toc_text, force).await {
            Ok(outcome) => outcome,
            Err(DomainError::ExistingContent {
                section_count,
                chunk_count,
                ..
            }) => {
                return Err(DomainError::ExistingContent {
                    section_count,
                    chunk_count,
                    toc_text: Some(toc_text),
                });
            }
            Err(e) => return Err(e),
        };

        self.books
            .update(&book_id, &BookChanges::toc_text_only(&toc_text))
            .await?
            .ok_or(DomainError::BookNotFound(book_id))?;

        Ok(EpubImportOutcome {
            status: PARSED_STATUS,
            toc_text,
            created: Some(outcome.created),
            message: None,
        })
    }
}
