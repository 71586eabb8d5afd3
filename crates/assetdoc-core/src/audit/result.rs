//! Per-asset audit outcome.

use std::fmt;

use crate::manifest::AssetCategory;

/// Coarse status of one audited asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditStatus {
    Ok,
    Empty,
    Redirect,
    Error,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuditStatus::Ok => "ok",
            AuditStatus::Empty => "empty",
            AuditStatus::Redirect => "redirect",
            AuditStatus::Error => "error",
        })
    }
}

/// Why an asset could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditError {
    /// Server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Connection, timeout, or URL failure; no status was received.
    #[error("{0}")]
    Network(String),
}

/// Status-specific detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditDetail {
    Ok {
        content_length: usize,
        content_type: Option<String>,
    },
    Empty,
    Redirect {
        /// First characters of the body, for the report.
        preview: String,
    },
    Error(AuditError),
}

/// Issue label used to group problems in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    RedirectHtml,
    Empty,
    Http(u32),
    ConnectionError,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::RedirectHtml => f.write_str("redirect_html"),
            IssueKind::Empty => f.write_str("empty"),
            IssueKind::Http(code) => write!(f, "http_{}", code),
            IssueKind::ConnectionError => f.write_str("connection_error"),
        }
    }
}

/// Outcome for one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditResult {
    pub url: String,
    pub category: AssetCategory,
    pub detail: AuditDetail,
}

impl AuditResult {
    pub fn status(&self) -> AuditStatus {
        match self.detail {
            AuditDetail::Ok { .. } => AuditStatus::Ok,
            AuditDetail::Empty => AuditStatus::Empty,
            AuditDetail::Redirect { .. } => AuditStatus::Redirect,
            AuditDetail::Error(_) => AuditStatus::Error,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status() == AuditStatus::Ok
    }

    pub fn issue(&self) -> Option<IssueKind> {
        match &self.detail {
            AuditDetail::Ok { .. } => None,
            AuditDetail::Empty => Some(IssueKind::Empty),
            AuditDetail::Redirect { .. } => Some(IssueKind::RedirectHtml),
            AuditDetail::Error(AuditError::Http(code)) => Some(IssueKind::Http(*code)),
            AuditDetail::Error(AuditError::Network(_)) => Some(IssueKind::ConnectionError),
        }
    }

    /// One-line description of the problem, or None when the asset is fine.
    pub fn problem(&self) -> Option<String> {
        match &self.detail {
            AuditDetail::Ok { .. } => None,
            AuditDetail::Empty => Some("Resource is empty".to_string()),
            AuditDetail::Redirect { .. } => {
                Some("Resource contains redirect HTML instead of actual content".to_string())
            }
            AuditDetail::Error(e) => Some(format!("Failed to load resource: {}", e)),
        }
    }
}
