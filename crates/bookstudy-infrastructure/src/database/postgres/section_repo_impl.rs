// ============================================================================
// Book Study Infrastructure - PostgreSQL Section Repository
// File: crates/bookstudy-infrastructure/src/database/postgres/section_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use bookstudy_core::domain::Section;
use bookstudy_core::error::DomainError;
use bookstudy_core::repositories::SectionRepository;

use super::{database_error, INSERT_BATCH_ROWS};

pub struct PgSectionRepository {
    pool: PgPool,
}

impl PgSectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SectionRow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub title: String,
    pub order_index: i32,
    pub depth: i32,
    pub toc_path: String,
}

impl From<SectionRow> for Section {
    fn from(row: SectionRow) -> Self {
        Section {
            id: row.id,
            book_id: row.book_id,
            parent_id: row.parent_id,
            title: row.title,
            order_index: row.order_index,
            depth: row.depth,
            toc_path: row.toc_path,
        }
    }
}

#[async_trait]
impl SectionRepository for PgSectionRepository {
    async fn list_by_book(&self, book_id: &Uuid) -> Result<Vec<Section>, DomainError> {
        let rows: Vec<SectionRow> = sqlx::query_as(
            r#"
            SELECT id, book_id, parent_id, title, order_index, depth, toc_path
            FROM sections
            WHERE book_id = $1
            ORDER BY order_index ASC
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("listing sections"))?;

        Ok(rows.into_iter().map(Section::from).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Section>, DomainError> {
        let row: Option<SectionRow> = sqlx::query_as(
            r#"
            SELECT id, book_id, parent_id, title, order_index, depth, toc_path
            FROM sections
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("finding section by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn count_by_book(&self, book_id: &Uuid) -> Result<i64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sections WHERE book_id = $1")
            .bind(book_id)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error("counting sections"))?;
        Ok(count)
    }

    async fn replace_for_book(&self, book_id: &Uuid, sections: &[Section]) -> Result<u64, DomainError> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(database_error("starting section replace"))?;

        let removed_chunks = sqlx::query("DELETE FROM chunks WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut *transaction)
            .await
            .map_err(database_error("deleting chunks"))?
            .rows_affected();

        let removed_sections = sqlx::query("DELETE FROM sections WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut *transaction)
            .await
            .map_err(database_error("deleting sections"))?
            .rows_affected();

        // parents precede children in document order, so batches never reference ahead
        let mut inserted = 0;
        for batch in sections.chunks(INSERT_BATCH_ROWS) {
            let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO sections (id, book_id, parent_id, title, order_index, depth, toc_path) ",
            );
            query_builder.push_values(batch, |mut b, section| {
                b.push_bind(section.id)
                    .push_bind(section.book_id)
                    .push_bind(section.parent_id)
                    .push_bind(&section.title)
                    .push_bind(section.order_index)
                    .push_bind(section.depth)
                    .push_bind(&section.toc_path);
            });
            inserted += query_builder
                .build()
                .execute(&mut *transaction)
                .await
                .map_err(database_error("inserting sections"))?
                .rows_affected();
        }

        transaction
            .commit()
            .await
            .map_err(database_error("committing section replace"))?;

        info!(
            "Replaced sections of book {}: removed {} sections and {} chunks, inserted {}",
            book_id, removed_sections, removed_chunks, inserted
        );
        Ok(inserted)
    }
}
