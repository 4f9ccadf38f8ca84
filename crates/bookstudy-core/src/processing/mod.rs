//! Pure text processing: TOC parsing, paragraph chunking, outline building.

pub mod paragraph_chunker;
pub mod section_tree;
pub mod toc_parser;

pub use paragraph_chunker::{chunk_text_by_paragraphs, ChunkConfig};
pub use section_tree::build_section_tree;
pub use toc_parser::parse_toc;

/// Whitespace as pasted text sees it, including a byte order mark.
pub(crate) fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

pub(crate) fn trim_blank(text: &str) -> &str {
    text.trim_matches(is_blank_char)
}
