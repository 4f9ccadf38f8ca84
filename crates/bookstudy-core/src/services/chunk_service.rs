// ============================================================================
// Book Study Core - Chunk Service
// File: crates/bookstudy-core/src/services/chunk_service.rs
// ============================================================================
//! Section text ingestion and chunk queries

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{Chunk, NewChunk};
use crate::error::DomainError;
use crate::processing::{chunk_text_by_paragraphs, ChunkConfig};
use crate::repositories::{ChunkRepository, SectionRepository};

/// Raw text to be chunked into one section.
#[derive(Debug, Clone, Default)]
pub struct IngestRequest {
    pub section_id: Uuid,
    pub text: String,
    pub max_chars: Option<usize>,
    pub min_chars: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestOutcome {
    pub inserted: usize,
    pub first_chunk_index: i32,
}

pub struct ChunkService {
    sections: Arc<dyn SectionRepository>,
    chunks: Arc<dyn ChunkRepository>,
    defaults: ChunkConfig,
}

impl ChunkService {
    pub fn new(
        sections: Arc<dyn SectionRepository>,
        chunks: Arc<dyn ChunkRepository>,
        defaults: ChunkConfig,
    ) -> Self {
        Self {
            sections,
            chunks,
            defaults,
        }
    }

    /// Chunk `request.text` and append the chunks after the section's last one.
    pub async fn ingest(
        &self,
        book_id: Uuid,
        request: IngestRequest,
    ) -> Result<IngestOutcome, DomainError> {
        if request.text.trim().is_empty() {
            return Err(DomainError::ValidationError("text is required".to_string()));
        }
        let config = self.resolve_config(request.max_chars, request.min_chars)?;

        let section = self
            .sections
            .find_by_id(&request.section_id)
            .await?
            .ok_or(DomainError::SectionNotFound(request.section_id))?;
        if section.book_id != book_id {
            return Err(DomainError::SectionNotInBook {
                section_id: section.id,
                book_id,
            });
        }

        let first_chunk_index = self
            .chunks
            .max_chunk_index(&section.id)
            .await?
            .map_or(0, |max| max + 1);

        let rows: Vec<NewChunk> = chunk_text_by_paragraphs(&request.text, &config)
            .into_iter()
            .enumerate()
            .map(|(position, input)| {
                NewChunk::from_input(book_id, section.id, first_chunk_index + position as i32, input)
            })
            .collect();

        if rows.is_empty() {
            debug!("No chunks produced for section {}", section.id);
        } else {
            self.chunks.insert_many(&rows).await?;
        }
        info!(
            "Ingested {} chunks into section {} starting at index {}",
            rows.len(),
            section.id,
            first_chunk_index
        );

        Ok(IngestOutcome {
            inserted: rows.len(),
            first_chunk_index,
        })
    }

    pub async fn list(
        &self,
        book_id: Uuid,
        section_id: Option<Uuid>,
    ) -> Result<Vec<Chunk>, DomainError> {
        self.chunks.list_by_book(&book_id, section_id).await
    }

    fn resolve_config(
        &self,
        max_chars: Option<usize>,
        min_chars: Option<usize>,
    ) -> Result<ChunkConfig, DomainError> {
        let config = ChunkConfig::new(
            max_chars.unwrap_or(self.defaults.max_chars),
            min_chars.unwrap_or(self.defaults.min_chars),
        );
        if config.max_chars == 0 {
            return Err(DomainError::ValidationError(
                "max_chars must be greater than 0".to_string(),
            ));
        }
        if config.min_chars > config.max_chars {
            return Err(DomainError::ValidationError(
                "min_chars must not exceed max_chars".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{content_hash, Section};
    use crate::repositories::{MockChunkRepository, MockSectionRepository};
    use mockall::predicate::eq;

    fn section_of(book_id: Uuid) -> Section {
        Section {
            id: Uuid::new_v4(),
            book_id,
            parent_id: None,
            title: "Chapter".to_string(),
            order_index: 0,
            depth: 0,
            toc_path: "Chapter".to_string(),
        }
    }

    fn sections_returning(section: Section) -> MockSectionRepository {
        let mut sections = MockSectionRepository::new();
        sections
            .expect_find_by_id()
            .with(eq(section.id))
            .returning(move |_| Ok(Some(section.clone())));
        sections
    }

    fn request(section_id: Uuid, text: &str) -> IngestRequest {
        IngestRequest {
            section_id,
            text: text.to_string(),
            ..IngestRequest::default()
        }
    }

    #[tokio::test]
    async fn test_ingest_starts_at_zero_for_empty_section() {
        let book_id = Uuid::new_v4();
        let section = section_of(book_id);
        let section_id = section.id;

        let mut chunks = MockChunkRepository::new();
        chunks.expect_max_chunk_index().returning(|_| Ok(None));
        chunks
            .expect_insert_many()
            .withf(move |rows| {
                rows.len() == 1
                    && rows[0].chunk_index == 0
                    && rows[0].section_id == section_id
                    && rows[0].book_id == book_id
            })
            .times(1)
            .returning(|rows| Ok(rows.len() as u64));

        let service = ChunkService::new(
            Arc::new(sections_returning(section)),
            Arc::new(chunks),
            ChunkConfig::default(),
        );
        let outcome = service
            .ingest(book_id, request(section_id, "one\n\ntwo"))
            .await
            .expect("ingest succeeds");

        assert_eq!(
            outcome,
            IngestOutcome {
                inserted: 1,
                first_chunk_index: 0
            }
        );
    }

    #[tokio::test]
    async fn test_ingest_continues_after_existing_max() {
        let book_id = Uuid::new_v4();
        let section = section_of(book_id);
        let section_id = section.id;

        let mut chunks = MockChunkRepository::new();
        chunks
            .expect_max_chunk_index()
            .with(eq(section_id))
            .returning(|_| Ok(Some(0)));
        chunks
            .expect_insert_many()
            .withf(|rows| {
                let indexes: Vec<i32> = rows.iter().map(|r| r.chunk_index).collect();
                indexes == vec![1, 2]
            })
            .times(1)
            .returning(|rows| Ok(rows.len() as u64));

        let service = ChunkService::new(
            Arc::new(sections_returning(section)),
            Arc::new(chunks),
            ChunkConfig::default(),
        );
        let mut ingest = request(section_id, "first paragraph\n\nsecond paragraph");
        ingest.max_chars = Some(20);
        ingest.min_chars = Some(1);
        let outcome = service.ingest(book_id, ingest).await.expect("ingest succeeds");

        assert_eq!(outcome.first_chunk_index, 1);
        assert_eq!(outcome.inserted, 2);
    }

    #[tokio::test]
    async fn test_ingest_hashes_trimmed_text() {
        let book_id = Uuid::new_v4();
        let section = section_of(book_id);
        let section_id = section.id;

        let mut chunks = MockChunkRepository::new();
        chunks.expect_max_chunk_index().returning(|_| Ok(None));
        chunks
            .expect_insert_many()
            .withf(|rows| rows[0].text == "body" && rows[0].hash == content_hash("body"))
            .times(1)
            .returning(|rows| Ok(rows.len() as u64));

        let service = ChunkService::new(
            Arc::new(sections_returning(section)),
            Arc::new(chunks),
            ChunkConfig::default(),
        );
        service
            .ingest(book_id, request(section_id, "\n\n  body  \n"))
            .await
            .expect("ingest succeeds");
    }

    #[tokio::test]
    async fn test_ingest_rejects_section_of_other_book() {
        let section = section_of(Uuid::new_v4());
        let section_id = section.id;
        let mut chunks = MockChunkRepository::new();
        chunks.expect_insert_many().times(0);

        let service = ChunkService::new(
            Arc::new(sections_returning(section)),
            Arc::new(chunks),
            ChunkConfig::default(),
        );
        let result = service.ingest(Uuid::new_v4(), request(section_id, "text")).await;

        assert!(matches!(result, Err(DomainError::SectionNotInBook { .. })));
    }

    #[tokio::test]
    async fn test_ingest_unknown_section() {
        let mut sections = MockSectionRepository::new();
        sections.expect_find_by_id().returning(|_| Ok(None));

        let service = ChunkService::new(
            Arc::new(sections),
            Arc::new(MockChunkRepository::new()),
            ChunkConfig::default(),
        );
        let result = service
            .ingest(Uuid::new_v4(), request(Uuid::new_v4(), "text"))
            .await;

        assert!(matches!(result, Err(DomainError::SectionNotFound(_))));
    }

    #[tokio::test]
    async fn test_ingest_validates_before_lookup() {
        let mut sections = MockSectionRepository::new();
        sections.expect_find_by_id().times(0);
        let service = ChunkService::new(
            Arc::new(sections),
            Arc::new(MockChunkRepository::new()),
            ChunkConfig::default(),
        );

        let blank = service
            .ingest(Uuid::new_v4(), request(Uuid::new_v4(), "  \n "))
            .await;
        assert!(matches!(blank, Err(DomainError::ValidationError(_))));

        let mut inverted = request(Uuid::new_v4(), "text");
        inverted.max_chars = Some(10);
        inverted.min_chars = Some(50);
        let inverted = service.ingest(Uuid::new_v4(), inverted).await;
        assert!(matches!(inverted, Err(DomainError::ValidationError(_))));
    }
}
