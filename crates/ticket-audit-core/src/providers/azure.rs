//! Azure OpenAI chat-completions client.
//!
//! One POST per call, no retry. Status handling lives in `complete`: any
//! non-2xx answer becomes [`AuditError::Remote`] with the body kept verbatim.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use tracing::debug;

use super::{CompletionClient, TEMPERATURE};
use crate::config::CompletionConfig;
use crate::error::{AuditError, AuditResult};
use crate::prompt::ChatMessage;

const USER_AGENT_VALUE: &str = concat!("ticket-audit/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Clone)]
pub struct AzureOpenAiClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    api_version: String,
    model: String,
}

impl AzureOpenAiClient {
    pub fn new(config: &CompletionConfig) -> AuditResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| AuditError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for AzureOpenAiClient {
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> AuditResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages,
            max_tokens,
            temperature: TEMPERATURE,
        };
        debug!(url = %self.url, model = %self.model, max_tokens, "sending completion request");

        let resp = self
            .client
            .post(&self.url)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = body_or_read_error(resp.text().await);
            return Err(AuditError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = resp.json().await.map_err(|e| AuditError::InvalidResponse {
            message: format!("response body is not JSON: {}", e),
        })?;

        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AuditError::InvalidResponse {
                message: "response missing choices[0].message.content".to_string(),
            })?
            .to_string();

        debug!(chars = text.len(), "received completion");
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "azure-openai"
    }
}

// The status is the real failure; a broken body read is reported inside it.
fn body_or_read_error<E: std::fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<failed to read response body: {e}>"))
}
