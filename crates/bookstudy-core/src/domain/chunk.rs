//! Chunk domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// One chunk as emitted by the paragraph chunker.
///
/// Offsets count characters in the line-ending-normalized source text and
/// cover the raw paragraph span; `text` is the trimmed content of that span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkInput {
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// A chunk ready to be persisted for a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewChunk {
    pub book_id: Uuid,
    pub section_id: Uuid,
    pub chunk_index: i32,
    pub text: String,
    pub start_offset: i32,
    pub end_offset: i32,
    pub hash: String,
}

impl NewChunk {
    pub fn from_input(book_id: Uuid, section_id: Uuid, chunk_index: i32, input: ChunkInput) -> Self {
        let hash = content_hash(&input.text);
        Self {
            book_id,
            section_id,
            chunk_index,
            start_offset: offset_to_i32(input.start_offset),
            end_offset: offset_to_i32(input.end_offset),
            text: input.text,
            hash,
        }
    }
}

/// Persisted chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: Uuid,
    pub book_id: Uuid,
    pub section_id: Uuid,
    pub chunk_index: i32,
    pub text: String,
    pub start_offset: i32,
    pub end_offset: i32,
    pub hash: String,
    pub created_at: DateTime<Utc>,
}

/// Lowercase hex SHA-256 of the chunk text.
pub fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

fn offset_to_i32(offset: usize) -> i32 {
    i32::try_from(offset).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_is_sha256_hex() {
        assert_eq!(
            content_hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_new_chunk_from_input() {
        let book_id = Uuid::new_v4();
        let section_id = Uuid::new_v4();
        let chunk = NewChunk::from_input(
            book_id,
            section_id,
            7,
            ChunkInput {
                text: "abc".to_string(),
                start_offset: 3,
                end_offset: 9,
            },
        );

        assert_eq!(chunk.chunk_index, 7);
        assert_eq!((chunk.start_offset, chunk.end_offset), (3, 9));
        assert_eq!(chunk.hash, content_hash("abc"));
    }
}
