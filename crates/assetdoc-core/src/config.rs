use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// `[server]` section: where the static file server listens and what it serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (e.g. "127.0.0.1" or "0.0.0.0").
    pub bind: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Directory to serve files from. None = current working directory.
    pub root: Option<PathBuf>,
    /// Seconds a client may take to send its request head.
    pub header_timeout_secs: u64,
    /// Hard cap on a connection's lifetime, in seconds.
    pub connection_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8000,
            root: None,
            header_timeout_secs: 5,
            connection_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// "bind:port" string for `TcpListener::bind`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn header_timeout(&self) -> Duration {
        Duration::from_secs(self.header_timeout_secs)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// Directory to serve: the configured root, or the current working directory.
    pub fn root_dir(&self) -> Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir().context("current working directory"),
        }
    }
}

/// `[audit]` section: how the auditor reaches the server and paces requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Base URL that manifest entries are joined onto.
    pub base_url: String,
    /// Minimum delay in milliseconds between two request starts.
    pub interval_ms: u64,
    /// Maximum number of requests in flight (1 = strictly sequential).
    pub workers: usize,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Optional manifest file; if missing, the built-in manifest is used.
    pub manifest: Option<PathBuf>,
    /// Follow HTTP redirects instead of reporting the 3xx status.
    pub follow_redirects: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            interval_ms: 100,
            workers: 1,
            timeout_secs: 5,
            connect_timeout_secs: 5,
            manifest: None,
            follow_redirects: false,
        }
    }
}

impl AuditConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// `[mime]` section: extra entries merged over the built-in MIME tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MimeConfig {
    /// Literal filename -> content type (checked before extensions).
    pub literal: BTreeMap<String, String>,
    /// Extension without the dot -> content type.
    pub extensions: BTreeMap<String, String>,
}

/// Global configuration loaded from `~/.config/assetdoc/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetdocConfig {
    pub server: ServerConfig,
    pub audit: AuditConfig,
    pub mime: MimeConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("assetdoc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AssetdocConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<AssetdocConfig> {
    if !path.exists() {
        let default_cfg = AssetdocConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: AssetdocConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = AssetdocConfig::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.server.header_timeout(), Duration::from_secs(5));
        assert!(cfg.server.root.is_none());
        assert_eq!(cfg.audit.interval(), Duration::from_millis(100));
        assert_eq!(cfg.audit.workers, 1);
        assert_eq!(cfg.audit.timeout(), Duration::from_secs(5));
        assert!(cfg.mime.literal.is_empty());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = AssetdocConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AssetdocConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.server.port, cfg.server.port);
        assert_eq!(parsed.audit.base_url, cfg.audit.base_url);
        assert_eq!(parsed.audit.interval_ms, cfg.audit.interval_ms);
    }

    #[test]
    fn config_toml_partial_sections() {
        let toml = r#"
            [server]
            port = 9090

            [audit]
            workers = 4
        "#;
        let cfg: AssetdocConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.audit.workers, 4);
        assert_eq!(cfg.audit.interval_ms, 100);
        assert_eq!(cfg.server.listen_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn config_toml_mime_overrides() {
        let toml = r#"
            [mime.literal]
            "fonts(1)" = "font/woff2"

            [mime.extensions]
            webp = "image/webp"
        "#;
        let cfg: AssetdocConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.mime.literal.get("fonts(1)").map(String::as_str), Some("font/woff2"));
        assert_eq!(cfg.mime.extensions.get("webp").map(String::as_str), Some("image/webp"));
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.server.port, 8000);
        let again = load_or_init_at(&path).unwrap();
        assert_eq!(again.audit.base_url, cfg.audit.base_url);
    }

    #[test]
    fn root_dir_prefers_configured_root() {
        let cfg = ServerConfig {
            root: Some(PathBuf::from("/srv/snapshot")),
            ..ServerConfig::default()
        };
        assert_eq!(cfg.root_dir().unwrap(), PathBuf::from("/srv/snapshot"));
    }
}
