// ============================================================================
// Book Study API - Section Handlers
// File: crates/bookstudy-api/src/handlers/sections.rs
// ============================================================================

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use bookstudy_core::domain::{Section, SectionNode};
use bookstudy_core::services::TocImportOutcome;
use tracing::info;

use super::require_id;
use crate::dto::ImportTocRequest;
use crate::error::ApiError;
use crate::response::ItemsResponse;
use crate::state::AppState;

pub async fn list_sections(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemsResponse<Section>>, ApiError> {
    let book_id = require_id(&id, "book")?;
    let sections = state.toc_service.list_sections(book_id).await?;
    Ok(Json(ItemsResponse::new(sections)))
}

pub async fn section_tree(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemsResponse<SectionNode>>, ApiError> {
    let book_id = require_id(&id, "book")?;
    let tree = state.toc_service.section_tree(book_id).await?;
    Ok(Json(ItemsResponse::new(tree)))
}

/// An empty body imports the TOC text already stored on the book.
pub async fn import_toc(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<TocImportOutcome>, ApiError> {
    let book_id = require_id(&id, "book")?;
    let payload: ImportTocRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ImportTocRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {}", e)))?
    };

    info!("TOC import requested for book {} (force: {})", book_id, payload.force);
    let outcome = state
        .toc_service
        .import_stored(book_id, payload.toc_text, payload.force)
        .await?;
    Ok(Json(outcome))
}
