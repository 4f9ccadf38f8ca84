// ============================================================================
// Book Study API - Book Handlers
// File: crates/bookstudy-api/src/handlers/books.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bookstudy_core::domain::{Book, BookChanges};

use super::require_id;
use crate::dto::{CreateBookRequest, UpdateBookRequest};
use crate::error::ApiError;
use crate::response::{ItemResponse, ItemsResponse, OkResponse};
use crate::state::AppState;

pub async fn list_books(
    State(state): State<AppState>,
) -> Result<Json<ItemsResponse<Book>>, ApiError> {
    let books = state.book_service.list().await?;
    Ok(Json(ItemsResponse::new(books)))
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<ItemResponse<Book>>), ApiError> {
    let book = state
        .book_service
        .create(
            &payload.title,
            payload.author.as_deref(),
            payload.language.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ItemResponse::new(book))))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse<Book>>, ApiError> {
    let id = require_id(&id, "book")?;
    let book = state.book_service.get(id).await?;
    Ok(Json(ItemResponse::new(book)))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBookRequest>,
) -> Result<Json<ItemResponse<Book>>, ApiError> {
    let changes = BookChanges::new(
        payload.title.as_deref(),
        payload.author.as_deref(),
        payload.language.as_deref(),
        payload.toc_text.as_deref(),
    )?;
    let id = require_id(&id, "book")?;
    let book = state.book_service.update(id, changes).await?;
    Ok(Json(ItemResponse::new(book)))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let id = require_id(&id, "book")?;
    state.book_service.delete(id).await?;
    Ok(Json(OkResponse::ok()))
}
