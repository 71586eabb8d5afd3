//! Content-type resolution for served files.
//!
//! Lookup order: literal filename table, then extension table, then `text/plain`.
//! The literal table exists because the snapshot contains files saved without an
//! extension (`css2`, `js`) or with a browser-added suffix (`css2(1)`).

mod defaults;

pub use defaults::{APPLICATION_JAVASCRIPT, TEXT_CSS, TEXT_HTML, TEXT_PLAIN};

use crate::config::MimeConfig;
use std::collections::HashMap;

/// Immutable MIME lookup table. Build once at startup and share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct MimeTable {
    literal: HashMap<String, String>,
    extensions: HashMap<String, String>,
}

impl Default for MimeTable {
    fn default() -> Self {
        Self {
            literal: defaults::LITERALS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            extensions: defaults::EXTENSIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl MimeTable {
    /// Built-in tables with config entries merged on top (config wins).
    pub fn from_config(cfg: &MimeConfig) -> Self {
        let mut table = Self::default();
        for (name, ty) in &cfg.literal {
            table.literal.insert(name.clone(), ty.clone());
        }
        for (ext, ty) in &cfg.extensions {
            let ext = ext.trim_start_matches('.').to_ascii_lowercase();
            table.extensions.insert(ext, ty.clone());
        }
        table
    }

    /// Resolve the content type for a request path such as `/css2(1)` or `img/next.svg`.
    pub fn resolve(&self, path: &str) -> &str {
        let path = path.trim_start_matches('/');
        if let Some(ty) = self.literal.get(path) {
            return ty;
        }
        extension(path)
            .and_then(|ext| self.extensions.get(&ext.to_ascii_lowercase()))
            .map(String::as_str)
            .unwrap_or(TEXT_PLAIN)
    }
}

/// Text after the last `.` of the final path segment. A leading dot (".env") is not an extension.
fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(i) if i + 1 < name.len() => Some(&name[i + 1..]),
        Some(_) => None,
    }
}
