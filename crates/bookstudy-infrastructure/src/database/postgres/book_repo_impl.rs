// ============================================================================
// Book Study Infrastructure - PostgreSQL Book Repository
// File: crates/bookstudy-infrastructure/src/database/postgres/book_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use bookstudy_core::domain::{Book, BookChanges};
use bookstudy_core::error::DomainError;
use bookstudy_core::repositories::BookRepository;

use super::database_error;

pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub language: String,
    pub toc_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            author: row.author,
            language: row.language,
            toc_text: row.toc_text,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list(&self) -> Result<Vec<Book>, DomainError> {
        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, author, language, toc_text, created_at
            FROM books
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("listing books"))?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Book>, DomainError> {
        let row: Option<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, author, language, toc_text, created_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("finding book by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, book: &Book) -> Result<Book, DomainError> {
        let row: BookRow = sqlx::query_as(
            r#"
            INSERT INTO books (id, title, author, language, toc_text, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, author, language, toc_text, created_at
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.language)
        .bind(&book.toc_text)
        .bind(book.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("creating book"))?;

        info!("Book row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, id: &Uuid, changes: &BookChanges) -> Result<Option<Book>, DomainError> {
        // $3 tells whether author is part of the patch, since NULL is a valid new author
        let row: Option<BookRow> = sqlx::query_as(
            r#"
            UPDATE books
            SET
                title = COALESCE($2, title),
                author = CASE WHEN $3 THEN $4 ELSE author END,
                language = COALESCE($5, language),
                toc_text = COALESCE($6, toc_text)
            WHERE id = $1
            RETURNING id, title, author, language, toc_text, created_at
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(changes.author.is_some())
        .bind(changes.author.clone().flatten())
        .bind(&changes.language)
        .bind(&changes.toc_text)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("updating book"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error("deleting book"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(database_error("pinging database"))?;
        Ok(())
    }
}
