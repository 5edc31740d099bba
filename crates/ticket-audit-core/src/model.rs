//! Core data types: ticket batches, verdicts and report summaries.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Raw ticket payload, embedded verbatim in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketBatch {
    raw: String,
}

impl TicketBatch {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// One verdict as emitted by the model.
///
/// Every field is optional and loosely typed; nothing here checks that the
/// model followed the schema. An absent key stays `None`, an explicit `null`
/// is kept as `Some(Value::Null)`. Keys outside the schema are kept in
/// `extra` so the JSON report carries them through. Defaults are applied only
/// by [`VerdictRow::from_partial`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialVerdict {
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<Value>,

    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<Value>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "keep_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<Value>,

    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub completeness: Option<Value>,

    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Value>,

    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub remarks: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An ordered sequence of verdicts; the unit of persistence.
pub type Report = Vec<PartialVerdict>;

/// Fully-defaulted view of a verdict, one per CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictRow {
    pub ticket_id: String,
    pub ticket_number: String,
    pub kind: String,
    pub completeness: bool,
    pub missing_fields: Vec<String>,
    pub remarks: String,
}

impl VerdictRow {
    pub const UNKNOWN_TICKET: &'static str = "unknown";

    pub fn from_partial(verdict: &PartialVerdict) -> Self {
        Self {
            ticket_id: value_text(verdict.ticket_id.as_ref())
                .unwrap_or_else(|| Self::UNKNOWN_TICKET.to_string()),
            ticket_number: value_text(verdict.ticket_number.as_ref()).unwrap_or_default(),
            kind: value_text(verdict.kind.as_ref()).unwrap_or_default(),
            completeness: value_flag(verdict.completeness.as_ref()),
            missing_fields: value_list(verdict.missing_fields.as_ref()),
            remarks: value_text(verdict.remarks.as_ref()).unwrap_or_default(),
        }
    }

    /// CSV cells in header order.
    pub fn to_record(&self) -> [String; 6] {
        [
            self.ticket_id.clone(),
            self.ticket_number.clone(),
            self.kind.clone(),
            if self.completeness { "True" } else { "False" }.to_string(),
            self.missing_fields.join(", "),
            self.remarks.clone(),
        ]
    }
}

/// Outcome of a successful report write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub tickets: usize,
    pub complete: usize,
    pub incomplete: usize,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub message: String,
}

// A present key always yields `Some`, even when its value is `null`.
fn keep_null<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn value_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn value_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|v| value_text(Some(v))).collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}
