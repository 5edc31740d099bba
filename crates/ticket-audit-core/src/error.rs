//! Error types for the audit pipeline.

use std::path::PathBuf;

/// Maximum number of characters of model output kept on a parse failure.
pub const SNIPPET_CHARS: usize = 500;

/// Audit errors.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// Required configuration is missing or unusable.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// An input file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// An input file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rules file is not valid delimited text.
    #[error("invalid rules file {}: {message}", path.display())]
    Csv { path: PathBuf, message: String },

    /// The completion endpoint answered with a non-success status.
    #[error("remote error (status {status}): {body}")]
    Remote { status: u16, body: String },

    /// Transport failure or timeout talking to the completion endpoint.
    #[error("network error: {message}")]
    Network { message: String },

    /// The endpoint answered 2xx but the body had no completion text.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// The model output is not a JSON array of verdicts.
    #[error("failed to parse model response as JSON: {message}")]
    Parse { message: String, snippet: String },

    /// Writing a report file failed.
    #[error("failed to write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AuditError {
    /// Build a parse error, keeping the head of the offending text.
    pub fn parse(message: impl Into<String>, raw: &str) -> Self {
        Self::Parse {
            message: message.into(),
            snippet: truncate_chars(raw, SNIPPET_CHARS),
        }
    }

    /// Errors the CLI turns into a "no report produced" outcome instead of a crash.
    pub fn is_guarded(&self) -> bool {
        matches!(
            self,
            Self::Remote { .. }
                | Self::Network { .. }
                | Self::InvalidResponse { .. }
                | Self::Parse { .. }
        )
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        if self.is_guarded() {
            1
        } else {
            2
        }
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        Self::Network { message }
    }
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
