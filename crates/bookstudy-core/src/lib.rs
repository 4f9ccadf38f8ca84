//! # Book Study Core
//! 
//! Domain entities, text processing (TOC parsing, paragraph chunking, section
//! tree building), repository traits, and domain services.

pub mod domain;
pub mod processing;
pub mod repositories;
pub mod services;
pub mod epub;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use processing::{build_section_tree, chunk_text_by_paragraphs, parse_toc, ChunkConfig};
