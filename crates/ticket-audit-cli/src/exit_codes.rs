//! Process exit codes for ticket-audit.
//! Scripts rely on these; keep them stable.

use ticket_audit_core::{AuditError, ReportSummary};

pub const SUCCESS: i32 = 0;
pub const ANALYSIS_FAILED: i32 = 1; // Endpoint or model output failure, or an empty report
pub const INTERNAL_ERROR: i32 = 2; // Config, input or filesystem error

/// Result of a `check` run once guarded failures have been absorbed.
#[derive(Debug)]
pub enum RunOutcome {
    Reported(ReportSummary),
    NoReport(AuditError),
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Reported(summary) if summary.tickets == 0 => ANALYSIS_FAILED,
            Self::Reported(_) => SUCCESS,
            Self::NoReport(_) => ANALYSIS_FAILED,
        }
    }
}
