//! Static file server for the snapshot.
//!
//! An axum router with a single fallback handler serves every path. Files are read
//! from the root directory; the content type comes from the shared [`MimeTable`].
//! Each connection carries one request (`keep_alive(false)`) and is bounded by
//! [`ConnectionLimits`].

mod handle;
mod request;
mod response;

pub use handle::{respond, router, ConnectionLimits};
pub use request::{is_confined, relative_path};
pub use response::FileResponse;

use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;

use crate::config::AssetdocConfig;
use crate::mime::MimeTable;

/// Pages listed in the startup banner.
pub const EXAMPLE_PAGES: &[(&str, &str)] = &[
    ("Main page", "index.html"),
    ("Capra", "capra.html"),
    ("Message", "msg.html"),
    ("Proxy", "proxy.html"),
];

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

pub struct StaticServer {
    listener: TcpListener,
    root: PathBuf,
    app: Router,
    limits: ConnectionLimits,
}

impl StaticServer {
    /// Bind `addr` (e.g. "127.0.0.1:8000"; port 0 picks a free port).
    pub async fn bind(addr: &str, root: PathBuf, mime: MimeTable) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        Ok(Self {
            listener,
            app: router(root.clone(), mime),
            root,
            limits: ConnectionLimits::default(),
        })
    }

    /// Bind using the `[server]` and `[mime]` config sections.
    pub async fn from_config(cfg: &AssetdocConfig) -> anyhow::Result<Self> {
        let root = cfg.server.root_dir()?;
        let mime = MimeTable::from_config(&cfg.mime);
        let server = Self::bind(&cfg.server.listen_addr(), root, mime).await?;
        Ok(server.with_limits(ConnectionLimits {
            header_read: cfg.server.header_timeout(),
            lifetime: cfg.server.connection_timeout(),
        }))
    }

    pub fn with_limits(mut self, limits: ConnectionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accept connections until `shutdown` resolves. Each connection runs in its own task.
    pub async fn serve_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!(
            addr = %self.local_addr()?,
            root = %self.root.display(),
            "static server listening"
        );
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("static server shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let app = self.app.clone();
                        tokio::spawn(handle::serve_connection(stream, peer, app, self.limits));
                    }
                    Err(e) => tracing::warn!("accept failed: {}", e),
                },
            }
        }
    }

    /// Accept connections forever.
    pub async fn serve(self) -> Result<(), ServerError> {
        self.serve_until(std::future::pending()).await
    }
}
