//! Completion endpoint configuration.
//!
//! Settings are gathered from flags or the environment into
//! [`CompletionSettings`], then resolved exactly once into a
//! [`CompletionConfig`]. Resolution is all-or-nothing: a missing required
//! value fails before any client is built.

use std::time::Duration;

use crate::error::{AuditError, AuditResult};

pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_URL: &str = "AZURE_OPENAI_URL";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_MODEL: &str = "AZURE_OPENAI_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "TICKET_AUDIT_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gpt-4.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Unresolved settings; any field may still be missing.
#[derive(Debug, Clone, Default)]
pub struct CompletionSettings {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub api_version: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl CompletionSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> AuditResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// A timeout that is set but not a whole number of seconds is a
    /// `Config` error rather than silently falling back to the default.
    pub fn from_lookup<F>(lookup: F) -> AuditResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match non_blank(lookup(ENV_TIMEOUT_SECS)) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| AuditError::Config {
                message: format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}"),
            })?),
            None => None,
        };

        Ok(Self {
            url: lookup(ENV_URL),
            api_key: lookup(ENV_API_KEY),
            api_version: lookup(ENV_API_VERSION),
            model: lookup(ENV_MODEL),
            timeout_secs,
        })
    }

    /// Resolve into a usable configuration.
    pub fn resolve(self) -> AuditResult<CompletionConfig> {
        let url = non_blank(self.url);
        let api_key = non_blank(self.api_key);
        let api_version = non_blank(self.api_version);

        if self.timeout_secs == Some(0) {
            return Err(AuditError::Config {
                message: format!("{ENV_TIMEOUT_SECS} must be greater than zero"),
            });
        }

        let mut missing = Vec::new();
        if api_key.is_none() {
            missing.push(ENV_API_KEY);
        }
        if api_version.is_none() {
            missing.push(ENV_API_VERSION);
        }
        if url.is_none() {
            missing.push(ENV_URL);
        }

        match (url, api_key, api_version) {
            (Some(url), Some(api_key), Some(api_version)) => Ok(CompletionConfig {
                url,
                api_key,
                api_version,
                model: non_blank(self.model).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            }),
            _ => Err(AuditError::Config {
                message: format!(
                    "missing required environment variables: {}",
                    missing.join(", ")
                ),
            }),
        }
    }
}

/// Resolved endpoint configuration, passed by reference into the client.
#[derive(Clone)]
pub struct CompletionConfig {
    pub url: String,
    pub api_key: String,
    pub api_version: String,
    pub model: String,
    pub timeout: Duration,
}

impl CompletionConfig {
    /// Resolve straight from the environment.
    pub fn from_env() -> AuditResult<Self> {
        CompletionSettings::from_env()?.resolve()
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keep the key out of logs and panics.
impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
