//! CLI for assetdoc: serve a captured site snapshot and audit its assets.

mod commands;

use anyhow::Result;
use assetdoc_core::config;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use commands::{run_audit, run_completions, run_man, run_manifest, run_serve, run_shim};

/// Top-level CLI for assetdoc.
#[derive(Debug, Parser)]
#[command(name = "assetdoc")]
#[command(about = "Serve a scraped static site snapshot and audit its assets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Serve the snapshot directory over HTTP.
    Serve {
        /// Port to listen on (default from config, 8000).
        #[arg(long, short)]
        port: Option<u16>,
        /// Directory to serve (default: current directory).
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Fetch every manifest asset from a running server and report broken ones.
    Audit {
        /// Base URL of the server (default from config, http://localhost:8000/).
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Concurrent requests (default 1).
        #[arg(long, value_name = "N")]
        workers: Option<usize>,
        /// Minimum delay between request starts, in milliseconds (default 100).
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
        /// TOML manifest to audit instead of the built-in one.
        #[arg(long, value_name = "PATH")]
        manifest: Option<PathBuf>,
    },

    /// Print the asset manifest.
    Manifest {
        /// TOML manifest to print instead of the built-in one.
        #[arg(long, value_name = "PATH")]
        manifest: Option<PathBuf>,
    },

    /// Run the fallback shim's resource loader against a running server.
    Shim {
        /// Base URL of the server.
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// TOML manifest whose css/js entries are loaded.
        #[arg(long, value_name = "PATH")]
        manifest: Option<PathBuf>,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // These two do not need config.
        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Serve { port, root } => {
                if let Some(port) = port {
                    cfg.server.port = port;
                }
                if root.is_some() {
                    cfg.server.root = root;
                }
                run_serve(&cfg).await?;
            }
            CliCommand::Audit {
                base_url,
                workers,
                interval_ms,
                manifest,
            } => {
                if let Some(url) = base_url {
                    cfg.audit.base_url = url;
                }
                if let Some(n) = workers {
                    cfg.audit.workers = n;
                }
                if let Some(ms) = interval_ms {
                    cfg.audit.interval_ms = ms;
                }
                if manifest.is_some() {
                    cfg.audit.manifest = manifest;
                }
                run_audit(&cfg).await?;
            }
            CliCommand::Manifest { manifest } => {
                run_manifest(manifest.as_deref().or(cfg.audit.manifest.as_deref()))?;
            }
            CliCommand::Shim { base_url, manifest } => {
                if let Some(url) = base_url {
                    cfg.audit.base_url = url;
                }
                if manifest.is_some() {
                    cfg.audit.manifest = manifest;
                }
                run_shim(&cfg).await?;
            }
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
