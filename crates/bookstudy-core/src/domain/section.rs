//! Section domain entities

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A node of a book's outline as produced by the TOC parser and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub book_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub title: String,
    /// Global document order within one parse, `0..n`.
    pub order_index: i32,
    pub depth: i32,
    /// Ancestor titles followed by this title, joined with `" > "`.
    pub toc_path: String,
}

/// The subset of a section needed to rebuild the outline tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatSection {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub title: String,
    pub order_index: i32,
    pub depth: i32,
}

impl From<&Section> for FlatSection {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id,
            parent_id: section.parent_id,
            title: section.title.clone(),
            order_index: section.order_index,
            depth: section.depth,
        }
    }
}

/// View-only outline node; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionNode {
    pub id: Uuid,
    pub title: String,
    pub depth: i32,
    pub children: Vec<SectionNode>,
}
