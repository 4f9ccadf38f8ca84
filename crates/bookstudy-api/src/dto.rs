//! Request payloads

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub title: String,
    pub author: Option<String>,
    pub language: Option<String>,
}

/// Only string fields take part in the update; a blank author clears it and a
/// blank language resets it to the default.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub toc_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImportTocRequest {
    pub toc_text: Option<String>,
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Deserialize)]
pub struct IngestTextRequest {
    #[serde(default)]
    pub section_id: String,
    #[serde(default)]
    pub text: String,
    pub max_chars: Option<usize>,
    pub min_chars: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChunksQuery {
    pub section_id: Option<String>,
}
