//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_CHUNK_MAX_CHARS, DEFAULT_CHUNK_MIN_CHARS, DEFAULT_EPUB_TIMEOUT_SECONDS,
    DEFAULT_MAX_UPLOAD_BYTES,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub chunking: ChunkingSettings,
    pub epub: EpubSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingSettings {
    pub max_chars: usize,
    pub min_chars: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EpubSettings {
    /// Executable that turns an EPUB path into TOC JSON on stdout.
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub timeout_seconds: u64,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// Daily-rolling log files are written here when set.
    #[serde(default)]
    pub directory: Option<String>,
}

impl AppConfig {
    /// Layered load: built-in defaults, `config/default`, `config/{APP_ENV}`,
    /// then `APP_*` environment variables (`APP_DATABASE__URL=...`).
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder_with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("epub.args"),
            )
            .build()?;

        let settings: AppConfig = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn builder_with_defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, AppError> {
        let builder = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "bookstudy-server")?
            .set_default("database.url", "postgres://localhost/bookstudy")?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("chunking.max_chars", DEFAULT_CHUNK_MAX_CHARS as u64)?
            .set_default("chunking.min_chars", DEFAULT_CHUNK_MIN_CHARS as u64)?
            .set_default("epub.command", "parse-epub")?
            .set_default("epub.args", Vec::<String>::new())?
            .set_default("epub.timeout_seconds", DEFAULT_EPUB_TIMEOUT_SECONDS)?
            .set_default("epub.max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .set_default("logging.format", "pretty")?;
        Ok(builder)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.chunking.max_chars == 0 {
            return Err(AppError::InvalidConfig(
                "chunking.max_chars must be greater than zero".to_string(),
            ));
        }
        if self.chunking.min_chars > self.chunking.max_chars {
            return Err(AppError::InvalidConfig(format!(
                "chunking.min_chars ({}) exceeds chunking.max_chars ({})",
                self.chunking.min_chars, self.chunking.max_chars
            )));
        }
        if self.epub.command.trim().is_empty() {
            return Err(AppError::InvalidConfig("epub.command is empty".to_string()));
        }
        if self.epub.timeout_seconds == 0 {
            return Err(AppError::InvalidConfig(
                "epub.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
