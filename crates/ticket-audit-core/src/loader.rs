//! Input loaders for the rules CSV and the ticket batch.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{AuditError, AuditResult};
use crate::model::TicketBatch;

/// Load completeness rules from a CSV file: one rule per row, first column.
pub fn load_rules(path: impl AsRef<Path>) -> AuditResult<Vec<String>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| open_error(path, e))?;
    let rules = load_rules_from_reader(file).map_err(|e| AuditError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), rules = rules.len(), "loaded rules");
    Ok(rules)
}

/// Parse rules from any reader. There is no header row; rows whose first
/// field is blank are skipped.
pub fn load_rules_from_reader<R: Read>(reader: R) -> Result<Vec<String>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rules = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if let Some(rule) = record.get(0).map(str::trim).filter(|r| !r.is_empty()) {
            rules.push(rule.to_string());
        }
    }
    Ok(rules)
}

/// Read the ticket batch verbatim.
pub fn load_tickets(path: impl AsRef<Path>) -> AuditResult<TicketBatch> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    debug!(path = %path.display(), bytes = raw.len(), "loaded ticket batch");
    Ok(TicketBatch::new(raw))
}

fn open_error(path: &Path, err: std::io::Error) -> AuditError {
    if err.kind() == std::io::ErrorKind::NotFound {
        AuditError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        AuditError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
