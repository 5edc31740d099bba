//! End-to-end flow through the public API: load, prompt, complete, extract, write.

use std::path::Path;

use serde_json::json;
use tempfile::tempdir;
use ticket_audit_core::{
    build_prompt, extract_verdicts, load_rules, load_tickets, write_reports, AuditResult,
    AzureOpenAiClient, CompletionClient, CompletionSettings, ReportSummary, DEFAULT_MAX_TOKENS,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_REPLY: &str = "```json\n[{\"ticket_id\":\"abc\",\"ticket_number\":\"INC001\",\"type\":\"incident\",\"completeness\":false,\"missing_fields\":[\"short_description\"],\"remarks\":\"Add description\"}]\n```";

fn write_inputs(dir: &Path) {
    std::fs::write(
        dir.join("rules.csv"),
        "Short description must be filled\nPriority must be set\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("tickets.json"),
        r#"[{"sys_id":"abc","number":"INC001"}]"#,
    )
    .unwrap();
}

async fn run_flow(dir: &Path, server: &MockServer) -> AuditResult<ReportSummary> {
    let rules = load_rules(dir.join("rules.csv"))?;
    let tickets = load_tickets(dir.join("tickets.json"))?;
    let prompt = build_prompt(&rules, &tickets);

    let config = CompletionSettings {
        url: Some(server.uri()),
        api_key: Some("k".into()),
        api_version: Some("2024-06-01".into()),
        ..Default::default()
    }
    .resolve()?;
    let client = AzureOpenAiClient::new(&config)?;

    let text = client.complete(&prompt.messages(), DEFAULT_MAX_TOKENS).await?;
    let report = extract_verdicts(&text)?;
    write_reports(&report, dir.join("out.json"), dir.join("out.csv"))
}

#[tokio::test]
async fn incomplete_ticket_is_reported() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": MODEL_REPLY } }]
        })))
        .mount(&server)
        .await;

    let summary = run_flow(dir.path(), &server).await.unwrap();
    assert_eq!(summary.tickets, 1);
    assert_eq!(summary.incomplete, 1);

    let json_report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("out.json")).unwrap())
            .unwrap();
    assert_eq!(
        json_report,
        json!([{
            "ticket_id": "abc",
            "ticket_number": "INC001",
            "type": "incident",
            "completeness": false,
            "missing_fields": ["short_description"],
            "remarks": "Add description"
        }])
    );

    let csv_report = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
    let lines: Vec<&str> = csv_report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "ticket_id,ticket_number,type,completeness,missing_fields,remarks",
            "abc,INC001,incident,False,short_description,Add description",
        ]
    );

    // The rules reach the endpoint as bullets in the system message.
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let system = body["messages"][0]["content"].as_str().unwrap();
    assert!(system.ends_with("- Short description must be filled\n- Priority must be set"));
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains(r#"[{"sys_id":"abc","number":"INC001"}]"#));
}

#[tokio::test]
async fn server_error_writes_nothing() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = run_flow(dir.path(), &server).await.unwrap_err();
    assert!(err.is_guarded());
    assert!(err.to_string().contains("500"));
    assert!(!dir.path().join("out.json").exists());
    assert!(!dir.path().join("out.csv").exists());
}

#[tokio::test]
async fn prose_reply_writes_nothing() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "Sorry, I cannot help with that." } }]
        })))
        .mount(&server)
        .await;

    let err = run_flow(dir.path(), &server).await.unwrap_err();
    assert!(err.is_guarded());
    assert!(!dir.path().join("out.json").exists());
}
