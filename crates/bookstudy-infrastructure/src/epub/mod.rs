//! EPUB parser adapters

pub mod process_parser;

pub use process_parser::ProcessEpubParser;
