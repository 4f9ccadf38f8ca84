// ============================================================================
// Book Study Infrastructure - External EPUB Parser
// File: crates/bookstudy-infrastructure/src/epub/process_parser.rs
// Description: Runs the configured EPUB parser executable as a child process
// ============================================================================
//! The parser is invoked as `<command> <args..> <file>` and must print one
//! JSON object `{title?, author?, language?, toc_text?}` on stdout.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use bookstudy_core::epub::{EpubParser, ParsedEpub};
use bookstudy_core::error::DomainError;
use bookstudy_shared::config::EpubSettings;

const STDERR_EXCERPT_CHARS: usize = 500;

pub struct ProcessEpubParser {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessEpubParser {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    pub fn from_settings(settings: &EpubSettings) -> Self {
        Self::new(
            settings.command.clone(),
            settings.args.clone(),
            Duration::from_secs(settings.timeout_seconds),
        )
    }
}

#[async_trait]
impl EpubParser for ProcessEpubParser {
    async fn parse(&self, path: &Path) -> Result<ParsedEpub, DomainError> {
        debug!("Running EPUB parser {} on {}", self.command, path.display());

        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                error!("Failed to start EPUB parser {}: {}", self.command, e);
                DomainError::EpubParseError(format!("failed to start parser: {}", e))
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                error!("EPUB parser timed out after {:?}", self.timeout);
                DomainError::EpubParseError(format!("parser timed out after {:?}", self.timeout))
            })?
            .map_err(|e| DomainError::EpubParseError(e.to_string()))?;

        if !output.status.success() {
            let stderr: String = String::from_utf8_lossy(&output.stderr)
                .chars()
                .take(STDERR_EXCERPT_CHARS)
                .collect();
            error!("EPUB parser exited with {}: {}", output.status, stderr.trim());
            return Err(DomainError::EpubParseError(format!(
                "parser exited with {}",
                output.status
            )));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            error!("EPUB parser printed invalid JSON: {}", e);
            DomainError::EpubParseError(format!("invalid parser output: {}", e))
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str, timeout: Duration) -> ProcessEpubParser {
        // the file path arrives as $0 after the inline script
        ProcessEpubParser::new("sh", vec!["-c".to_string(), script.to_string()], timeout)
    }

    #[tokio::test]
    async fn test_parses_stdout_json() {
        let parser = shell(
            r#"printf '{"title":"T","toc_text":"Part\\n  Chapter"}'"#,
            Duration::from_secs(5),
        );
        let parsed = parser.parse(Path::new("/tmp/book.epub")).await.expect("parsed");

        assert_eq!(parsed.title.as_deref(), Some("T"));
        assert_eq!(parsed.trimmed_toc(), "Part\n  Chapter");
    }

    #[tokio::test]
    async fn test_receives_file_path_last() {
        let parser = shell(r#"printf '{"toc_text":"%s"}' "$0""#, Duration::from_secs(5));
        let parsed = parser.parse(Path::new("/tmp/x.epub")).await.expect("parsed");

        assert_eq!(parsed.toc_text.as_deref(), Some("/tmp/x.epub"));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_parse_error() {
        let parser = shell("echo boom >&2; exit 3", Duration::from_secs(5));
        let result = parser.parse(Path::new("/tmp/book.epub")).await;

        assert!(matches!(result, Err(DomainError::EpubParseError(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let parser = shell("echo not-json", Duration::from_secs(5));
        let result = parser.parse(Path::new("/tmp/book.epub")).await;

        assert!(matches!(result, Err(DomainError::EpubParseError(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_parse_error() {
        let parser = shell("sleep 5", Duration::from_millis(100));
        let result = parser.parse(Path::new("/tmp/book.epub")).await;

        assert!(matches!(result, Err(DomainError::EpubParseError(message)) if message.contains("timed out")));
    }

    #[tokio::test]
    async fn test_missing_command_is_parse_error() {
        let parser = ProcessEpubParser::new("bookstudy-no-such-parser", Vec::new(), Duration::from_secs(1));
        let result = parser.parse(Path::new("/tmp/book.epub")).await;

        assert!(matches!(result, Err(DomainError::EpubParseError(_))));
    }
}
