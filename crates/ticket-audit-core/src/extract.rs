//! Turn raw model output into verdict records.

use crate::error::{AuditError, AuditResult};
use crate::model::PartialVerdict;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Strip a surrounding markdown code fence, if any.
///
/// Only a fence at the very start counts; the body runs up to the next
/// closing marker. Text without a leading fence is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let body = if let Some(rest) = text.strip_prefix(JSON_FENCE) {
        rest
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        rest
    } else {
        return text;
    };
    match body.find(FENCE) {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Parse model output as a JSON array of verdicts.
///
/// Field types are not checked here; see [`crate::model::VerdictRow`].
pub fn extract_verdicts(raw: &str) -> AuditResult<Vec<PartialVerdict>> {
    let cleaned = strip_code_fence(raw);
    serde_json::from_str::<Vec<PartialVerdict>>(cleaned)
        .map_err(|e| AuditError::parse(e.to_string(), raw))
}
