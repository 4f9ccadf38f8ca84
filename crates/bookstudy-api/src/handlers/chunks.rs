// ============================================================================
// Book Study API - Chunk Handlers
// File: crates/bookstudy-api/src/handlers/chunks.rs
// ============================================================================

use axum::{
    extract::{Path, Query, State},
    Json,
};
use bookstudy_core::domain::Chunk;
use bookstudy_core::services::{IngestOutcome, IngestRequest};

use super::require_id;
use crate::dto::{ChunksQuery, IngestTextRequest};
use crate::error::ApiError;
use crate::response::ItemsResponse;
use crate::state::AppState;

pub async fn list_chunks(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ChunksQuery>,
) -> Result<Json<ItemsResponse<Chunk>>, ApiError> {
    let book_id = require_id(&id, "book")?;
    let section_id = match query.section_id.as_deref() {
        Some(raw) if !raw.is_empty() => Some(require_id(raw, "section")?),
        _ => None,
    };
    let chunks = state.chunk_service.list(book_id, section_id).await?;
    Ok(Json(ItemsResponse::new(chunks)))
}

pub async fn ingest_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<IngestTextRequest>,
) -> Result<Json<IngestOutcome>, ApiError> {
    let book_id = require_id(&id, "book")?;
    let section_id = require_id(&payload.section_id, "section")?;

    let outcome = state
        .chunk_service
        .ingest(
            book_id,
            IngestRequest {
                section_id,
                text: payload.text,
                max_chars: payload.max_chars,
                min_chars: payload.min_chars,
            },
        )
        .await?;
    Ok(Json(outcome))
}
