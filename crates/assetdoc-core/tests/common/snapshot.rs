//! Builds a small captured-site snapshot on disk and serves it with `StaticServer`.
//!
//! The snapshot mixes real assets with the kinds of broken captures the auditor
//! should flag: a redirect stub, a blank script, and a missing image.
//!
//! Each test target uses a different subset of these helpers.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assetdoc_core::manifest::{AssetCategory, AssetDescriptor, Manifest};
use assetdoc_core::mime::MimeTable;
use assetdoc_core::server::{ConnectionLimits, StaticServer};
use tokio::sync::oneshot;

pub const REDIRECT_STUB: &str = "<!DOCTYPE html><script>window.location='x'</script>";

pub fn png_bytes() -> Vec<u8> {
    (0u8..=255).cycle().take(4096).collect()
}

pub fn write_snapshot(root: &Path) {
    fs::write(root.join("index.html"), "<!DOCTYPE html><html><body>home</body></html>").unwrap();
    fs::write(root.join("capra.html"), "<html><body>capra</body></html>").unwrap();
    fs::write(root.join("css2"), "body { margin: 0 }").unwrap();
    fs::write(root.join("css2(1)"), REDIRECT_STUB).unwrap();
    fs::write(root.join("js"), " \n\t ").unwrap();
    fs::write(root.join("cb=gapi.loaded_0"), "gapi.loaded_0 = function () {};").unwrap();
    fs::write(root.join("icon-192.png"), png_bytes()).unwrap();
    fs::write(root.join("fixes.css"), ".alert { padding: 1rem }").unwrap();
}

/// Manifest over the snapshot, in this order:
/// index.html, capra.html, css2, css2(1), js, cb=gapi.loaded_0, icon-192.png, next.svg.
pub fn manifest() -> Manifest {
    Manifest::new(vec![
        AssetDescriptor::new("index.html", AssetCategory::Page),
        AssetDescriptor::new("capra.html", AssetCategory::Page),
        AssetDescriptor::new("css2", AssetCategory::Css),
        AssetDescriptor::new("css2(1)", AssetCategory::Css),
        AssetDescriptor::new("js", AssetCategory::Js),
        AssetDescriptor::new("cb=gapi.loaded_0", AssetCategory::Js),
        AssetDescriptor::new("icon-192.png", AssetCategory::Image),
        AssetDescriptor::new("next.svg", AssetCategory::Image),
    ])
    .unwrap()
}

/// Running server; dropping it stops the accept loop.
pub struct RunningServer {
    pub base_url: String,
    pub addr: std::net::SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

/// Serve `root` on a free loopback port.
pub async fn start(root: &Path) -> RunningServer {
    start_with_limits(root, ConnectionLimits::default()).await
}

pub async fn start_with_limits(root: &Path, limits: ConnectionLimits) -> RunningServer {
    let server = StaticServer::bind("127.0.0.1:0", root.to_path_buf(), MimeTable::default())
        .await
        .expect("bind")
        .with_limits(limits);
    let addr = server.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = server
            .serve_until(async {
                let _ = rx.await;
            })
            .await;
    });
    RunningServer {
        base_url: format!("http://{}/", addr),
        addr,
        _shutdown: tx,
    }
}
