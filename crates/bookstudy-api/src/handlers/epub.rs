// ============================================================================
// Book Study API - EPUB Upload Handler
// File: crates/bookstudy-api/src/handlers/epub.rs
// ============================================================================

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bookstudy_core::services::EpubImportOutcome;
use tracing::info;

use super::require_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Multipart form with a `file` part and an optional `force` part (`"true"`).
pub async fn upload_epub(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<EpubImportOutcome>, ApiError> {
    let book_id = require_id(&id, "book")?;

    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut force = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                        .to_vec(),
                );
            }
            "force" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid force: {}", e)))?;
                force = text.trim() == "true";
            }
            _ => {}
        }
    }

    let file_data = file_data.ok_or_else(|| ApiError::BadRequest("file is required".to_string()))?;
    let filename = filename.ok_or_else(|| ApiError::BadRequest("file is required".to_string()))?;

    info!("EPUB upload for book {}: {} ({} bytes)", book_id, filename, file_data.len());
    let outcome = state
        .epub_service
        .import(book_id, &filename, &file_data, force)
        .await?;
    Ok(Json(outcome))
}
