use super::super::args::CheckArgs;
use crate::exit_codes::RunOutcome;
use ticket_audit_core::{
    build_prompt, extract_verdicts, load_rules, load_tickets, write_reports, AuditError,
    AuditResult, AzureOpenAiClient, CompletionClient, ReportSummary, TicketBatch,
};
use tracing::{info, warn};

pub(crate) async fn run(args: CheckArgs) -> anyhow::Result<i32> {
    println!("Loading data files...");
    let tickets = load_tickets(&args.inputs.tickets)?;
    let rules = load_rules(&args.inputs.rules)?;
    println!("Loaded {} rules", rules.len());

    let config = args.endpoint.settings().resolve()?;
    let client = AzureOpenAiClient::new(&config)?;
    info!(model = %config.model, timeout_secs = config.timeout.as_secs(), "completion client ready");

    let outcome = analyze(&args, &rules, &tickets, &client).await?;
    print_outcome(&outcome);
    Ok(outcome.exit_code())
}

/// Prompt, call, parse and write. Endpoint and parse failures become
/// `RunOutcome::NoReport`; anything else is returned as an error.
pub(crate) async fn analyze(
    args: &CheckArgs,
    rules: &[String],
    tickets: &TicketBatch,
    client: &dyn CompletionClient,
) -> AuditResult<RunOutcome> {
    match execute(args, rules, tickets, client).await {
        Ok(summary) => Ok(RunOutcome::Reported(summary)),
        Err(e) if e.is_guarded() => {
            warn!(error = %e, provider = client.provider_name(), "no report produced");
            Ok(RunOutcome::NoReport(e))
        }
        Err(e) => Err(e),
    }
}

async fn execute(
    args: &CheckArgs,
    rules: &[String],
    tickets: &TicketBatch,
    client: &dyn CompletionClient,
) -> AuditResult<ReportSummary> {
    let prompt = build_prompt(rules, tickets);

    println!("Sending request to {}...", client.provider_name());
    let text = client.complete(&prompt.messages(), args.max_tokens).await?;
    println!("Got response from {}!", client.provider_name());

    let report = extract_verdicts(&text)?;
    write_reports(&report, &args.out_json, &args.out_csv)
}

fn print_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Reported(summary) if summary.tickets == 0 => {
            println!("{}", summary.message);
            println!();
            println!("Model returned no verdicts.");
            println!("JSON report: {}", summary.json_path.display());
            println!("CSV report: {}", summary.csv_path.display());
            println!("Analysis failed.");
        }
        RunOutcome::Reported(summary) => {
            println!("{}", summary.message);
            println!();
            println!(
                "Analysis complete! Analyzed {} tickets ({} complete, {} incomplete).",
                summary.tickets, summary.complete, summary.incomplete
            );
            println!("JSON report: {}", summary.json_path.display());
            println!("CSV report: {}", summary.csv_path.display());
            println!("Analysis completed successfully!");
        }
        RunOutcome::NoReport(AuditError::Parse { message, snippet }) => {
            println!("Failed to parse AI response as JSON: {}", message);
            println!("Raw response: {}...", snippet);
            println!("Analysis failed.");
        }
        RunOutcome::NoReport(err) => {
            println!("Error during completion request: {}", err);
            println!("Analysis failed.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{EndpointArgs, InputArgs};
    use crate::exit_codes::{ANALYSIS_FAILED, SUCCESS};
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::tempdir;
    use ticket_audit_core::ChatMessage;

    struct ScriptedClient {
        reply: Mutex<Option<AuditResult<String>>>,
    }

    impl ScriptedClient {
        fn new(reply: AuditResult<String>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(&self, _messages: &[ChatMessage], _max_tokens: u32) -> AuditResult<String> {
            self.reply
                .lock()
                .unwrap()
                .take()
                .expect("completion requested more than once")
        }

        fn provider_name(&self) -> &'static str {
            "scripted"
        }
    }

    fn args(dir: &Path) -> CheckArgs {
        CheckArgs {
            inputs: InputArgs {
                tickets: dir.join("tickets.json"),
                rules: dir.join("rules.csv"),
            },
            endpoint: EndpointArgs::default(),
            out_json: dir.join("report.json"),
            out_csv: dir.join("report.csv"),
            max_tokens: 8000,
        }
    }

    fn rules() -> Vec<String> {
        vec!["Priority must be set".to_string()]
    }

    #[tokio::test]
    async fn success_writes_reports() {
        let dir = tempdir().unwrap();
        let client = ScriptedClient::new(Ok(
            r#"[{"ticket_id":"abc","completeness":true},{"ticket_id":"def"}]"#.to_string(),
        ));

        let outcome = analyze(&args(dir.path()), &rules(), &TicketBatch::new("[]"), &client)
            .await
            .unwrap();

        assert_eq!(outcome.exit_code(), SUCCESS);
        let RunOutcome::Reported(summary) = outcome else {
            panic!("expected a report");
        };
        assert_eq!(summary.tickets, 2);
        assert_eq!(summary.complete, 1);
        assert!(dir.path().join("report.json").exists());
        assert!(dir.path().join("report.csv").exists());
    }

    #[tokio::test]
    async fn parse_failure_is_no_report() {
        let dir = tempdir().unwrap();
        let client = ScriptedClient::new(Ok("I am unable to comply.".to_string()));

        let outcome = analyze(&args(dir.path()), &rules(), &TicketBatch::new("[]"), &client)
            .await
            .unwrap();

        assert_eq!(outcome.exit_code(), ANALYSIS_FAILED);
        assert!(matches!(
            outcome,
            RunOutcome::NoReport(AuditError::Parse { .. })
        ));
        assert!(!dir.path().join("report.json").exists());
        assert!(!dir.path().join("report.csv").exists());
    }

    #[tokio::test]
    async fn remote_failure_is_no_report() {
        let dir = tempdir().unwrap();
        let client = ScriptedClient::new(Err(AuditError::Remote {
            status: 503,
            body: "busy".to_string(),
        }));

        let outcome = analyze(&args(dir.path()), &rules(), &TicketBatch::new("[]"), &client)
            .await
            .unwrap();

        match outcome {
            RunOutcome::NoReport(err) => assert!(err.to_string().contains("503")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!dir.path().join("report.json").exists());
    }

    #[tokio::test]
    async fn empty_report_is_a_failure_but_files_are_written() {
        let dir = tempdir().unwrap();
        let client = ScriptedClient::new(Ok("[]".to_string()));

        let outcome = analyze(&args(dir.path()), &rules(), &TicketBatch::new("[]"), &client)
            .await
            .unwrap();

        assert_eq!(outcome.exit_code(), ANALYSIS_FAILED);
        assert!(matches!(&outcome, RunOutcome::Reported(s) if s.tickets == 0));
        assert!(dir.path().join("report.json").exists());
        assert!(dir.path().join("report.csv").exists());
    }

    #[tokio::test]
    async fn filesystem_failure_propagates() {
        let dir = tempdir().unwrap();
        let mut check = args(dir.path());
        check.out_json = dir.path().join("missing").join("report.json");
        let client = ScriptedClient::new(Ok("[]".to_string()));

        let err = analyze(&check, &rules(), &TicketBatch::new("[]"), &client)
            .await
            .unwrap_err();
        assert!(matches!(err, AuditError::Filesystem { .. }));
    }
}
