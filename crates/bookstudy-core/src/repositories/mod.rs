//! Repository traits (ports)

pub mod book_repository;
pub mod chunk_repository;
pub mod section_repository;

pub use book_repository::BookRepository;
pub use chunk_repository::ChunkRepository;
pub use section_repository::SectionRepository;

#[cfg(any(test, feature = "mocks"))]
pub use book_repository::MockBookRepository;
#[cfg(any(test, feature = "mocks"))]
pub use chunk_repository::MockChunkRepository;
#[cfg(any(test, feature = "mocks"))]
pub use section_repository::MockSectionRepository;
