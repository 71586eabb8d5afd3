//! `assetdoc shim` – load the manifest's CSS/JS the way the fallback shim would and
//! show what the page would end up with.

use anyhow::{Context, Result};
use assetdoc_core::audit::AuditOptions;
use assetdoc_core::config::AssetdocConfig;
use assetdoc_core::fetch::{CurlFetcher, Fetcher};
use assetdoc_core::manifest::{AssetCategory, Manifest};
use assetdoc_core::shim::{
    ApiLoader, AuthProvider, LoaderStatus, PageContext, ResourceLoader, SdkBindings, FIXES_CSS,
};
use std::sync::Arc;
use url::Url;

pub async fn run_shim(cfg: &AssetdocConfig) -> Result<()> {
    let manifest = Manifest::load_or_builtin(cfg.audit.manifest.as_deref())?;
    let opts = AuditOptions::from_config(&cfg.audit)
        .with_context(|| format!("invalid base URL {:?}", cfg.audit.base_url))?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(CurlFetcher::from_config(&cfg.audit));

    let css: Vec<String> = manifest
        .of_category(AssetCategory::Css)
        .map(|a| a.url.clone())
        .collect();
    let js: Vec<String> = manifest
        .of_category(AssetCategory::Js)
        .map(|a| a.url.clone())
        .collect();
    let base_url = opts.base_url.clone();

    let (status, page) =
        tokio::task::spawn_blocking(move || load_page(fetcher, base_url, &css, &js))
            .await
            .context("shim loader task failed")?;

    let bindings = SdkBindings::stubbed();
    println!("SDK stubs: {}", bindings.stubbed_slots().join(", "));
    match bindings.auth().sign_in_anonymously() {
        Ok(user) => println!("Auth: signed in as {}", user.uid),
        Err(e) => println!("Auth: {}", e),
    }
    bindings.api().load("client:auth2", None);
    match bindings.api().sign_in() {
        Ok(profile) => println!("Google sign-in: {} <{}>", profile.name, profile.email),
        Err(e) => println!("Google sign-in: {}", e),
    }
    println!();

    println!(
        "Resources: {} loaded, {} failed ({} total)",
        status.loaded.len(),
        status.failed.len(),
        status.total
    );
    for url in &status.loaded {
        println!("  ✅ {}", url);
    }
    for url in &status.failed {
        println!("  ❌ {}", url);
    }
    println!();

    println!("Styles injected:");
    for s in page.styles() {
        println!("  {} ({} bytes)", s.source, s.content.len());
    }
    println!("Scripts injected:");
    for s in page.scripts() {
        println!("  {} ({} bytes)", s.source, s.content.len());
    }

    if !page.banners().is_empty() {
        println!();
        println!("Banners:");
        for b in page.banners() {
            println!("  {}", b);
        }
    }
    Ok(())
}

fn load_page(
    fetcher: Arc<dyn Fetcher>,
    base_url: Url,
    css: &[String],
    js: &[String],
) -> (LoaderStatus, PageContext) {
    let mut loader = ResourceLoader::new(fetcher, base_url);
    let mut page = PageContext::new();

    let mut css_loaded = false;
    for url in css {
        css_loaded |= loader.load_css(&mut page, url, None);
    }
    loader.load_css(&mut page, FIXES_CSS, None);
    if page.ensure_fallback_stylesheet(css_loaded) {
        page.show_warning("Stylesheets failed to load; using the built-in fallback styles");
    }

    for url in js {
        if !loader.load_js(&mut page, url, None) {
            page.report_script_error(&format!("failed to load script {}", url));
        }
    }

    let status = loader.status();
    if status.failed.is_empty() {
        page.show_success("All resources loaded");
    }
    (status, page)
}
