//! EPUB parser port

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Metadata and outline extracted from an EPUB file.
///
/// `toc_text` is an indented outline (two spaces per level) the TOC parser
/// accepts as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEpub {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub toc_text: Option<String>,
}

impl ParsedEpub {
    /// Trimmed TOC text, empty when the EPUB has none.
    pub fn trimmed_toc(&self) -> &str {
        self.toc_text.as_deref().map(str::trim).unwrap_or_default()
    }
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait EpubParser: Send + Sync {
    async fn parse(&self, path: &Path) -> Result<ParsedEpub, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_payload() {
        let parsed: ParsedEpub =
            serde_json::from_str(r#"{"title": "책", "toc_text": "  Part\n  Chapter \n"}"#)
                .expect("valid payload");

        assert_eq!(parsed.title.as_deref(), Some("책"));
        assert_eq!(parsed.author, None);
        assert_eq!(parsed.trimmed_toc(), "Part\n  Chapter");
    }

    #[test]
    fn test_missing_toc_is_empty() {
        let parsed: ParsedEpub = serde_json::from_str("{}").expect("valid payload");
        assert_eq!(parsed.trimmed_toc(), "");
    }
}
