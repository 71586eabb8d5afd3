//! Plain HTTP GET used by the auditor and the shim loader.
//!
//! Uses the curl crate (libcurl). [`CurlFetcher::get`] blocks; async callers go
//! through [`get_blocking`], which runs it on the blocking pool.

mod parse;

use std::str;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AuditConfig;

/// Status, declared type and body of one GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    pub status: u32,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Failure before any HTTP status was received.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("fetch task failed: {0}")]
    Task(String),
}

/// Something that can GET a URL. The auditor and shim loader only depend on this,
/// so tests can substitute canned responses.
pub trait Fetcher: Send + Sync {
    fn get(&self, url: &str) -> Result<FetchedResponse, FetchError>;
}

/// libcurl-backed fetcher with fixed timeouts. Redirects are reported as-is
/// unless `follow_redirects` is set.
#[derive(Debug, Clone, Copy)]
pub struct CurlFetcher {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub follow_redirects: bool,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(5),
            follow_redirects: false,
        }
    }
}

impl CurlFetcher {
    pub fn from_config(cfg: &AuditConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
            follow_redirects: cfg.follow_redirects,
        }
    }
}

impl Fetcher for CurlFetcher {
    fn get(&self, url: &str) -> Result<FetchedResponse, FetchError> {
        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(self.follow_redirects)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(url, status, bytes = body.len(), "GET");
        Ok(FetchedResponse {
            status,
            content_type: parse::content_type(&headers),
            body,
        })
    }
}

/// Run `fetcher.get(url)` on tokio's blocking pool.
pub async fn get_blocking(
    fetcher: Arc<dyn Fetcher>,
    url: String,
) -> Result<FetchedResponse, FetchError> {
    tokio::task::spawn_blocking(move || fetcher.get(&url))
        .await
        .map_err(|e| FetchError::Task(e.to_string()))?
}
