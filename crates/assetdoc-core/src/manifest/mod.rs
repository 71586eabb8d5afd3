//! Shared asset manifest: the ordered list of URLs the auditor and shim check.
//!
//! Both the audit runner and the shim loader consume the same [`Manifest`], either
//! the built-in snapshot list or one loaded from a TOML file.

mod builtin;
mod parse;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use parse::ManifestFile;

/// Kind of asset, used for per-category summaries and loader dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Css,
    Js,
    Image,
    Page,
}

impl AssetCategory {
    /// Summary order used in reports.
    pub const ALL: [AssetCategory; 4] = [
        AssetCategory::Css,
        AssetCategory::Js,
        AssetCategory::Image,
        AssetCategory::Page,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetCategory::Css => "css",
            AssetCategory::Js => "js",
            AssetCategory::Image => "image",
            AssetCategory::Page => "page",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One manifest entry: a URL relative to the site root and its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub url: String,
    pub category: AssetCategory,
}

impl AssetDescriptor {
    pub fn new(url: impl Into<String>, category: AssetCategory) -> Self {
        Self {
            url: url.into(),
            category,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse manifest: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("manifest entry {index} has an empty url")]
    EmptyUrl { index: usize },
    #[error("manifest lists {url} more than once")]
    Duplicate { url: String },
}

/// Ordered, duplicate-free list of assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    assets: Vec<AssetDescriptor>,
}

impl Manifest {
    /// Build a manifest, rejecting empty and duplicate URLs.
    pub fn new(assets: Vec<AssetDescriptor>) -> Result<Self, ManifestError> {
        let mut seen = HashSet::new();
        for (index, asset) in assets.iter().enumerate() {
            if asset.url.trim().is_empty() {
                return Err(ManifestError::EmptyUrl { index });
            }
            if !seen.insert(asset.url.as_str()) {
                return Err(ManifestError::Duplicate {
                    url: asset.url.clone(),
                });
            }
        }
        Ok(Self { assets })
    }

    /// The snapshot's 28 assets: pages, css, js, then images.
    pub fn builtin() -> Self {
        let assets = builtin::GROUPS
            .iter()
            .flat_map(|(category, urls)| {
                urls.iter().map(move |url| AssetDescriptor::new(*url, *category))
            })
            .collect();
        Self { assets }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ManifestError> {
        let file: ManifestFile = toml::from_str(s)?;
        Self::new(file.assets)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let data = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    /// Load from `path` if given, otherwise the built-in manifest.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ManifestError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&ManifestFile {
            assets: self.assets.clone(),
        })
    }

    pub fn assets(&self) -> &[AssetDescriptor] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetDescriptor> {
        self.assets.iter()
    }

    /// Entries of one category, in manifest order.
    pub fn of_category(&self, category: AssetCategory) -> impl Iterator<Item = &AssetDescriptor> {
        self.assets.iter().filter(move |a| a.category == category)
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a AssetDescriptor;
    type IntoIter = std::slice::Iter<'a, AssetDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.iter()
    }
}
