//! `assetdoc serve` – serve the snapshot until Ctrl+C.

use anyhow::Result;
use assetdoc_core::config::AssetdocConfig;
use assetdoc_core::server::{StaticServer, EXAMPLE_PAGES};

pub async fn run_serve(cfg: &AssetdocConfig) -> Result<()> {
    let server = StaticServer::from_config(cfg).await?;
    let addr = server.local_addr()?;
    let base = format!("http://{}:{}/", cfg.server.bind, addr.port());

    println!("Server running at {}", base);
    println!("Serving files from: {}", server.root().display());
    println!();
    println!("Example pages:");
    for (label, page) in EXAMPLE_PAGES {
        println!("  {:<10} {}{}", format!("{}:", label), base, page);
    }
    println!();
    println!("Press Ctrl+C to stop the server");

    server
        .serve_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    println!("\nServer stopped.");
    Ok(())
}
