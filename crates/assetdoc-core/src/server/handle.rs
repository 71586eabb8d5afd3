//! File handler, router, and per-connection driver.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, Method, Uri};
use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpStream;
use tower_http::cors::{Any, CorsLayer};

use crate::mime::MimeTable;

use super::request;
use super::response::FileResponse;

/// Per-connection time limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionLimits {
    /// Time allowed to receive the full request head.
    pub header_read: Duration,
    /// Time after which the connection is dropped regardless of state.
    pub lifetime: Duration,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            header_read: Duration::from_secs(5),
            lifetime: Duration::from_secs(30),
        }
    }
}

struct ServeState {
    root: PathBuf,
    mime: MimeTable,
}

/// Router serving files under `root` for every path and method, with permissive CORS.
/// OPTIONS requests are answered by the CORS layer.
pub fn router(root: PathBuf, mime: MimeTable) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .fallback(serve_file)
        .layer(cors)
        .with_state(Arc::new(ServeState { root, mime }))
}

async fn serve_file(State(state): State<Arc<ServeState>>, uri: Uri) -> FileResponse {
    respond(uri.path(), &state.root, &state.mime).await
}

/// Build the response for a request target.
pub async fn respond(target: &str, root: &Path, mime: &MimeTable) -> FileResponse {
    let rel = request::relative_path(target);
    if !request::is_confined(&rel) {
        tracing::info!("404: {} (outside root)", rel);
        return FileResponse::not_found(&rel);
    }

    let content_type = mime.resolve(&rel);
    match tokio::fs::read(root.join(&rel)).await {
        Ok(data) => {
            tracing::info!("200: {} ({})", rel, content_type);
            FileResponse::ok(content_type, data)
        }
        Err(e) => {
            tracing::info!("404: {}", rel);
            tracing::debug!(path = %rel, "read failed: {}", e);
            FileResponse::not_found(&rel)
        }
    }
}

/// Serve one HTTP/1.1 request on `stream`, then close.
pub(super) async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    app: Router,
    limits: ConnectionLimits,
) {
    let mut builder = http1::Builder::new();
    builder
        .timer(TokioTimer::new())
        .header_read_timeout(limits.header_read)
        .keep_alive(false);
    let conn = builder.serve_connection(TokioIo::new(stream), TowerToHyperService::new(app));

    match tokio::time::timeout(limits.lifetime, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::debug!(%peer, "connection error: {}", e),
        Err(_) => tracing::debug!(%peer, "connection dropped after {:?}", limits.lifetime),
    }
}
