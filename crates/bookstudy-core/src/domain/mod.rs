//! # Book Study Core - Domain Module
//! 
//! Domain entities for the Book Study application.

pub mod book;
pub mod section;
pub mod chunk;

// Re-export all entities
pub use book::{Book, BookChanges, BookContentCounts};
pub use section::{FlatSection, Section, SectionNode};
pub use chunk::{content_hash, Chunk, ChunkInput, NewChunk};
