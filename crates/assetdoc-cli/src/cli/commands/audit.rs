//! `assetdoc audit` – fetch every manifest asset and print the report.

use anyhow::{bail, Context, Result};
use assetdoc_core::audit::{check_server, result_line, AuditOptions, AuditReport, Auditor};
use assetdoc_core::config::AssetdocConfig;
use assetdoc_core::fetch::{CurlFetcher, Fetcher};
use assetdoc_core::manifest::Manifest;
use std::sync::Arc;

pub async fn run_audit(cfg: &AssetdocConfig) -> Result<()> {
    let manifest = Manifest::load_or_builtin(cfg.audit.manifest.as_deref())?;
    let opts = AuditOptions::from_config(&cfg.audit)
        .with_context(|| format!("invalid base URL {:?}", cfg.audit.base_url))?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(CurlFetcher::from_config(&cfg.audit));

    if let Err(e) = check_server(Arc::clone(&fetcher), &opts.base_url).await {
        println!("❌ Server is not running at {}", opts.base_url);
        println!("Start it first with: assetdoc serve");
        bail!("server not reachable: {}", e);
    }

    println!("Auditing {} assets at {}", manifest.len(), opts.base_url);
    println!();

    let auditor = Auditor::new(fetcher, opts);
    let results = auditor
        .run_with(&manifest, |r| println!("{}", result_line(r)))
        .await;

    let report = AuditReport::new(results);
    println!();
    print!("{}", report.render());
    println!();
    println!("To view the website, open {}index.html", auditor.options().base_url);
    Ok(())
}
