//! Application-wide constants

/// Upper bound (in characters) a chunk may reach before it is closed.
pub const DEFAULT_CHUNK_MAX_CHARS: usize = 2000;
/// A chunk shorter than this is never closed on a size trigger alone.
pub const DEFAULT_CHUNK_MIN_CHARS: usize = 400;
pub const DEFAULT_BOOK_LANGUAGE: &str = "ko";
pub const TOC_PATH_SEPARATOR: &str = " > ";
pub const DEFAULT_EPUB_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
