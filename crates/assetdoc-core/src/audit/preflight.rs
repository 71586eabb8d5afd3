//! Reachability check run before an audit.

use std::sync::Arc;
use url::Url;

use crate::fetch::{self, FetchError, Fetcher};

/// GET the base URL once. Any HTTP status counts as reachable; only a transport
/// failure is an error.
pub async fn check_server(fetcher: Arc<dyn Fetcher>, base_url: &Url) -> Result<u32, FetchError> {
    let resp = fetch::get_blocking(fetcher, base_url.to_string()).await?;
    tracing::debug!(%base_url, status = resp.status, "preflight");
    Ok(resp.status)
}
