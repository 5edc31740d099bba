//! Report persistence: a pretty-printed JSON file and a flat CSV file.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{AuditError, AuditResult};
use crate::model::{PartialVerdict, ReportSummary, VerdictRow};

pub const CSV_HEADER: [&str; 6] = [
    "ticket_id",
    "ticket_number",
    "type",
    "completeness",
    "missing_fields",
    "remarks",
];

/// Write both reports, overwriting existing files.
pub fn write_reports(
    report: &[PartialVerdict],
    json_path: impl AsRef<Path>,
    csv_path: impl AsRef<Path>,
) -> AuditResult<ReportSummary> {
    let json_path = json_path.as_ref();
    let csv_path = csv_path.as_ref();

    let json = serde_json::to_string_pretty(report).map_err(|e| AuditError::Filesystem {
        path: json_path.to_path_buf(),
        source: e.into(),
    })?;
    std::fs::write(json_path, json).map_err(|e| fs_error(json_path, e))?;
    debug!(path = %json_path.display(), "wrote JSON report");

    let file = std::fs::File::create(csv_path).map_err(|e| fs_error(csv_path, e))?;
    let rows = render_csv(report, std::io::BufWriter::new(file)).map_err(|e| fs_error(csv_path, e))?;
    debug!(path = %csv_path.display(), "wrote CSV report");

    let complete = rows.iter().filter(|r| r.completeness).count();
    let summary = ReportSummary {
        tickets: rows.len(),
        complete,
        incomplete: rows.len() - complete,
        json_path: json_path.to_path_buf(),
        csv_path: csv_path.to_path_buf(),
        message: format!(
            "Reports written. JSON: {}  CSV: {}",
            json_path.display(),
            csv_path.display()
        ),
    };
    info!(
        tickets = summary.tickets,
        complete = summary.complete,
        incomplete = summary.incomplete,
        "reports written"
    );
    Ok(summary)
}

/// Render the CSV report into `writer` and return the resolved rows.
pub fn render_csv<W: Write>(
    report: &[PartialVerdict],
    writer: W,
) -> std::io::Result<Vec<VerdictRow>> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    let mut rows = Vec::with_capacity(report.len());
    for verdict in report {
        let row = VerdictRow::from_partial(verdict);
        csv_writer.write_record(row.to_record())?;
        rows.push(row);
    }
    csv_writer.flush()?;
    Ok(rows)
}

fn fs_error(path: &Path, source: std::io::Error) -> AuditError {
    AuditError::Filesystem {
        path: path.to_path_buf(),
        source,
    }
}
