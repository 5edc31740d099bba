use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ticket_audit_core::config::{
    CompletionSettings, ENV_API_KEY, ENV_API_VERSION, ENV_MODEL, ENV_TIMEOUT_SECS, ENV_URL,
};
use ticket_audit_core::DEFAULT_MAX_TOKENS;

#[derive(Parser)]
#[command(
    name = "ticket-audit",
    version,
    about = "Check support tickets against completeness rules using an LLM"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate tickets and write JSON + CSV reports
    Check(CheckArgs),
    /// Print the prompt that `check` would send, without calling the endpoint
    Prompt(PromptArgs),
    Version,
}

#[derive(clap::Args, Clone, Debug)]
pub struct InputArgs {
    /// Ticket batch (JSON, passed to the model verbatim)
    #[arg(long, default_value = "./data/servicenow_tickets.json")]
    pub tickets: PathBuf,

    /// Rules CSV: one rule per row, first column
    #[arg(long, default_value = "./data/completeness_rules.csv")]
    pub rules: PathBuf,
}

#[derive(clap::Args, Clone, Default)]
pub struct EndpointArgs {
    /// Chat-completions URL
    #[arg(long, env = ENV_URL)]
    pub url: Option<String>,

    /// API key, sent as the `api-key` header
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Value for the `api-version` query parameter
    #[arg(long, env = ENV_API_VERSION)]
    pub api_version: Option<String>,

    /// Model identifier
    /// Default: gpt-4.1
    #[arg(long, env = ENV_MODEL)]
    pub model: Option<String>,

    /// Request timeout in seconds
    /// Default: 60
    #[arg(long, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,
}

impl EndpointArgs {
    pub fn settings(&self) -> CompletionSettings {
        CompletionSettings {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
            api_version: self.api_version.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Parser, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    #[command(flatten)]
    pub endpoint: EndpointArgs,

    /// Structured report output
    #[arg(long, default_value = "ticket_completeness_report.json")]
    pub out_json: PathBuf,

    /// Tabular report output
    #[arg(long, default_value = "ticket_completeness_report.csv")]
    pub out_csv: PathBuf,

    /// Upper bound on generated tokens
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
}

#[derive(Parser, Clone, Debug)]
pub struct PromptArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_defaults() {
        let cli = Cli::try_parse_from(["ticket-audit", "check"]).unwrap();
        let Command::Check(args) = cli.cmd else {
            panic!("expected check");
        };
        assert_eq!(args.inputs.rules, PathBuf::from("./data/completeness_rules.csv"));
        assert_eq!(args.out_csv, PathBuf::from("ticket_completeness_report.csv"));
        assert_eq!(args.max_tokens, 8000);
    }

    #[test]
    fn flags_feed_settings() {
        let cli = Cli::try_parse_from([
            "ticket-audit",
            "check",
            "--url",
            "https://example.test",
            "--api-key",
            "k",
            "--api-version",
            "2024-06-01",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        let Command::Check(args) = cli.cmd else {
            panic!("expected check");
        };
        let config = args.endpoint.settings().resolve().unwrap();
        assert_eq!(config.url, "https://example.test");
        assert_eq!(config.timeout.as_secs(), 5);
    }

    #[test]
    fn zero_timeout_flag_is_rejected_at_resolve() {
        let cli = Cli::try_parse_from([
            "ticket-audit",
            "check",
            "--url",
            "https://example.test",
            "--api-key",
            "k",
            "--api-version",
            "2024-06-01",
            "--timeout-secs",
            "0",
        ])
        .unwrap();
        let Command::Check(args) = cli.cmd else {
            panic!("expected check");
        };
        let err = args.endpoint.settings().resolve().unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }
}
