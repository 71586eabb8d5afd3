//! Resource auditor.
//!
//! Fetches every manifest URL, classifies each response as ok, empty, redirect stub,
//! or error, and aggregates the results into an [`AuditReport`]. Individual failures
//! never abort a run.

mod classify;
mod limiter;
mod preflight;
mod report;
mod result;
mod run;

pub use classify::{classify, is_redirect_stub};
pub use limiter::IntervalLimiter;
pub use preflight::check_server;
pub use report::{result_line, AuditReport, CategorySummary};
pub use result::{AuditDetail, AuditError, AuditResult, AuditStatus, IssueKind};
pub use run::{AuditOptions, Auditor};
