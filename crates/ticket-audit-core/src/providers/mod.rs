pub mod azure;

use crate::error::AuditResult;
use crate::prompt::ChatMessage;
use async_trait::async_trait;

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f32 = 0.2;

/// Default bound on generated tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 8000;

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one conversation and return the first completion's text.
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> AuditResult<String>;

    fn provider_name(&self) -> &'static str;
}
