//! JSON response envelopes

use serde::Serialize;

/// `{"item": ...}`
#[derive(Debug, Serialize)]
pub struct ItemResponse<T: Serialize> {
    pub item: T,
}

/// `{"items": [...]}`
#[derive(Debug, Serialize)]
pub struct ItemsResponse<T: Serialize> {
    pub items: Vec<T>,
}

/// `{"ok": true}`
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl<T: Serialize> ItemResponse<T> {
    pub fn new(item: T) -> Self {
        Self { item }
    }
}

impl<T: Serialize> ItemsResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
