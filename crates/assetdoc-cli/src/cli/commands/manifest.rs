//! `assetdoc manifest` – print the asset manifest grouped by category.

use anyhow::Result;
use assetdoc_core::manifest::{AssetCategory, Manifest};
use std::path::Path;

pub fn run_manifest(path: Option<&Path>) -> Result<()> {
    let manifest = Manifest::load_or_builtin(path)?;
    for category in AssetCategory::ALL {
        let urls: Vec<&str> = manifest.of_category(category).map(|a| a.url.as_str()).collect();
        if urls.is_empty() {
            continue;
        }
        println!("{} ({})", category, urls.len());
        for url in urls {
            println!("  {}", url);
        }
    }
    println!("total: {}", manifest.len());
    Ok(())
}
