//! Completeness checks for support tickets, judged by a hosted LLM.
//!
//! The crate is a straight pipeline:
//!
//! - [`loader`] reads the rules CSV and the raw ticket batch
//! - [`prompt`] builds the two-message conversation
//! - [`providers`] sends it to a chat-completions endpoint
//! - [`extract`] turns the model text into verdict records
//! - [`report`] writes the JSON and CSV reports
//!
//! Errors from the endpoint and from parsing are flagged by
//! [`AuditError::is_guarded`]; callers turn those into a "no report" outcome.
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `AZURE_OPENAI_API_KEY` | API key, sent as the `api-key` header (required) |
//! | `AZURE_OPENAI_URL` | Chat-completions URL (required) |
//! | `AZURE_OPENAI_API_VERSION` | Value of the `api-version` query parameter (required) |
//! | `AZURE_OPENAI_MODEL` | Model identifier (default: `gpt-4.1`) |
//! | `TICKET_AUDIT_TIMEOUT_SECS` | Request timeout in seconds (default: 60) |

pub mod config;
pub mod error;
pub mod extract;
pub mod loader;
pub mod model;
pub mod prompt;
pub mod providers;
pub mod report;

pub use config::{CompletionConfig, CompletionSettings};
pub use error::{AuditError, AuditResult};
pub use extract::{extract_verdicts, strip_code_fence};
pub use loader::{load_rules, load_rules_from_reader, load_tickets};
pub use model::{PartialVerdict, Report, ReportSummary, TicketBatch, VerdictRow};
pub use prompt::{build_prompt, ChatMessage, Prompt, Role};
pub use providers::azure::AzureOpenAiClient;
pub use providers::{CompletionClient, DEFAULT_MAX_TOKENS};
pub use report::{render_csv, write_reports, CSV_HEADER};
