//! # Book Study Shared
//! 
//! Configuration, telemetry, constants, and identifier helpers shared by
//! every Book Study crate.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
pub use utils::parse_entity_id;
