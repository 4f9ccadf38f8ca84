//! HTTP handlers

pub mod books;
pub mod chunks;
pub mod epub;
pub mod health;
pub mod sections;

use bookstudy_shared::parse_entity_id;
use uuid::Uuid;

use crate::error::ApiError;

/// Validate an identifier taken from the path or body before it reaches a service.
pub(crate) fn require_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    parse_entity_id(raw).ok_or_else(|| ApiError::BadRequest(format!("invalid {} id", what)))
}
