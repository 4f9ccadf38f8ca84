// ============================================================================
// Book Study Infrastructure - PostgreSQL Chunk Repository
// File: crates/bookstudy-infrastructure/src/database/postgres/chunk_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use bookstudy_core::domain::{Chunk, NewChunk};
use bookstudy_core::error::DomainError;
use bookstudy_core::repositories::ChunkRepository;

use super::{database_error, INSERT_BATCH_ROWS};

pub struct PgChunkRepository {
    pool: PgPool,
}

impl PgChunkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ChunkRow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub section_id: Uuid,
    pub chunk_index: i32,
    pub text: String,
    pub start_offset: i32,
    pub end_offset: i32,
    pub hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChunkRow> for Chunk {
    fn from(row: ChunkRow) -> Self {
        Chunk {
            id: row.id,
            book_id: row.book_id,
            section_id: row.section_id,
            chunk_index: row.chunk_index,
            text: row.text,
            start_offset: row.start_offset,
            end_offset: row.end_offset,
            hash: row.hash,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ChunkRepository for PgChunkRepository {
    async fn list_by_book(
        &self,
        book_id: &Uuid,
        section_id: Option<Uuid>,
    ) -> Result<Vec<Chunk>, DomainError> {
        let rows: Vec<ChunkRow> = sqlx::query_as(
            r#"
            SELECT
                c.id, c.book_id, c.section_id, c.chunk_index, c.text,
                c.start_offset, c.end_offset, c.hash, c.created_at
            FROM chunks c
            JOIN sections s ON s.id = c.section_id
            WHERE c.book_id = $1 AND ($2::uuid IS NULL OR c.section_id = $2)
            ORDER BY s.order_index ASC, c.chunk_index ASC
            "#,
        )
        .bind(book_id)
        .bind(section_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("listing chunks"))?;

        Ok(rows.into_iter().map(Chunk::from).collect())
    }

    async fn count_by_book(&self, book_id: &Uuid) -> Result<i64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chunks WHERE book_id = $1")
            .bind(book_id)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error("counting chunks"))?;
        Ok(count)
    }

    async fn max_chunk_index(&self, section_id: &Uuid) -> Result<Option<i32>, DomainError> {
        let (max,): (Option<i32>,) =
            sqlx::query_as("SELECT MAX(chunk_index) FROM chunks WHERE section_id = $1")
                .bind(section_id)
                .fetch_one(&self.pool)
                .await
                .map_err(database_error("reading max chunk index"))?;
        Ok(max)
    }

    async fn insert_many(&self, chunks: &[NewChunk]) -> Result<u64, DomainError> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(database_error("starting chunk insert"))?;

        let mut inserted = 0;
        for batch in chunks.chunks(INSERT_BATCH_ROWS) {
            let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
                r#"
                INSERT INTO chunks (
                    id, book_id, section_id, chunk_index, text,
                    start_offset, end_offset, hash
                )
                "#,
            );
            query_builder.push_values(batch, |mut b, chunk| {
                b.push_bind(Uuid::new_v4())
                    .push_bind(chunk.book_id)
                    .push_bind(chunk.section_id)
                    .push_bind(chunk.chunk_index)
                    .push_bind(&chunk.text)
                    .push_bind(chunk.start_offset)
                    .push_bind(chunk.end_offset)
                    .push_bind(&chunk.hash);
            });
            inserted += query_builder
                .build()
                .execute(&mut *transaction)
                .await
                .map_err(database_error("inserting chunks"))?
                .rows_affected();
        }

        transaction
            .commit()
            .await
            .map_err(database_error("committing chunk insert"))?;

        debug!("Inserted {} chunks", inserted);
        Ok(inserted)
    }
}
