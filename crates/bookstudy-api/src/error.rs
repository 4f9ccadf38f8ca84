//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookstudy_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

const EXISTING_CONTENT_MESSAGE: &str =
    "The book already has sections or chunks. Retry with force=true to replace them.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Existing content: {section_count} sections, {chunk_count} chunks")]
    ExistingContent {
        section_count: i64,
        chunk_count: i64,
        toc_text: Option<String>,
    },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

#[derive(Serialize)]
struct ConflictResponse {
    error: &'static str,
    message: &'static str,
    section_count: i64,
    chunk_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    toc_text: Option<String>,
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::BookNotFound(_) | DomainError::SectionNotFound(_) => {
                ApiError::NotFound(error.to_string())
            }
            DomainError::SectionNotInBook { .. }
            | DomainError::ValidationError(_)
            | DomainError::EmptyToc
            | DomainError::NoSectionsParsed => ApiError::BadRequest(error.to_string()),
            DomainError::ExistingContent {
                section_count,
                chunk_count,
                toc_text,
            } => ApiError::ExistingContent {
                section_count,
                chunk_count,
                toc_text,
            },
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            DomainError::EpubParseError(_) | DomainError::InternalError(_) => {
                ApiError::InternalError(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::ExistingContent {
                section_count,
                chunk_count,
                toc_text,
            } => {
                tracing::warn!(
                    "Conflict: {} sections and {} chunks exist",
                    section_count,
                    chunk_count
                );
                let body = Json(ConflictResponse {
                    error: "existing_sections",
                    message: EXISTING_CONTENT_MESSAGE,
                    section_count,
                    chunk_count,
                    toc_text,
                });
                return (StatusCode::CONFLICT, body).into_response();
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "DatabaseError", msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
