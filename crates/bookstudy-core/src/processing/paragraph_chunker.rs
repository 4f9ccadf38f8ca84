//! Paragraph-aware chunking.
//!
//! Paragraphs (runs of text separated by a blank line) are packed greedily
//! into chunks of at most `max_chars` characters. A chunk is only closed on a
//! size trigger once it holds `min_chars`, and a paragraph is never split, so
//! one oversized paragraph becomes one oversized chunk.

use bookstudy_shared::constants::{DEFAULT_CHUNK_MAX_CHARS, DEFAULT_CHUNK_MIN_CHARS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::trim_blank;
use crate::domain::ChunkInput;

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern is valid"));

/// Counted as the joint between two paragraphs of one chunk.
const PARAGRAPH_SEPARATOR_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    pub max_chars: usize,
    pub min_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_CHUNK_MAX_CHARS,
            min_chars: DEFAULT_CHUNK_MIN_CHARS,
        }
    }
}

impl ChunkConfig {
    pub fn new(max_chars: usize, min_chars: usize) -> Self {
        Self { max_chars, min_chars }
    }
}

/// Raw paragraph span, in bytes and in characters of the normalized text.
#[derive(Debug, Clone, Copy)]
struct Paragraph {
    start: usize,
    end: usize,
    start_char: usize,
    end_char: usize,
}

/// The chunk currently being filled.
#[derive(Debug)]
struct OpenSpan {
    first: Paragraph,
    last: Paragraph,
    buffered_chars: usize,
}

/// Split `text` into chunks along paragraph boundaries.
///
/// Line endings are normalized to `\n` first; the returned offsets index
/// characters of that normalized text. Empty or whitespace-only input yields
/// no chunks.
pub fn chunk_text_by_paragraphs(text: &str, config: &ChunkConfig) -> Vec<ChunkInput> {
    let normalized = text.replace("\r\n", "\n");
    let mut chunks = Vec::new();
    let mut open: Option<OpenSpan> = None;

    for paragraph in split_paragraphs(&normalized) {
        let segment = trim_blank(&normalized[paragraph.start..paragraph.end]);
        if segment.is_empty() {
            continue;
        }
        let segment_chars = segment.chars().count();

        open = Some(match open.take() {
            None => OpenSpan {
                first: paragraph,
                last: paragraph,
                buffered_chars: segment_chars,
            },
            Some(span) => {
                let next_len = span.buffered_chars + PARAGRAPH_SEPARATOR_LEN + segment_chars;
                if next_len > config.max_chars && span.buffered_chars >= config.min_chars {
                    flush(&normalized, &span, &mut chunks);
                    OpenSpan {
                        first: paragraph,
                        last: paragraph,
                        buffered_chars: segment_chars,
                    }
                } else {
                    OpenSpan {
                        last: paragraph,
                        buffered_chars: next_len,
                        ..span
                    }
                }
            }
        });
    }

    if let Some(span) = open {
        flush(&normalized, &span, &mut chunks);
    }

    chunks
}

fn flush(normalized: &str, span: &OpenSpan, chunks: &mut Vec<ChunkInput>) {
    let slice = trim_blank(&normalized[span.first.start..span.last.end]);
    if slice.is_empty() {
        return;
    }
    chunks.push(ChunkInput {
        text: slice.to_string(),
        start_offset: span.first.start_char,
        end_offset: span.last.end_char,
    });
}

/// Non-empty spans between paragraph breaks, in document order.
fn split_paragraphs(normalized: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut counter = CharCounter::new(normalized);
    let mut cursor = 0;

    for separator in PARAGRAPH_BREAK.find_iter(normalized) {
        let end = separator.start();
        if end > cursor {
            paragraphs.push(Paragraph {
                start: cursor,
                end,
                start_char: counter.char_offset(cursor),
                end_char: counter.char_offset(end),
            });
        }
        cursor = separator.end();
    }

    if cursor < normalized.len() {
        paragraphs.push(Paragraph {
            start: cursor,
            end: normalized.len(),
            start_char: counter.char_offset(cursor),
            end_char: counter.char_offset(normalized.len()),
        });
    }

    paragraphs
}

/// Byte-to-character offset conversion for monotonically increasing offsets.
struct CharCounter<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCounter<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, byte: 0, chars: 0 }
    }

    fn char_offset(&mut self, byte: usize) -> usize {
        if byte > self.byte {
            self.chars += self.text[self.byte..byte].chars().count();
            self.byte = byte;
        }
        self.chars
    }
}
