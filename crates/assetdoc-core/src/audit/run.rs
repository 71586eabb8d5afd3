//! Audit runner: bounded worker pool gated by the interval limiter.
//!
//! Keeps up to `workers` fetches in flight; each start waits for the limiter.
//! Results are slotted by manifest index, so the returned list is in manifest order
//! and holds exactly one entry per asset.

use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::AuditConfig;
use crate::fetch::{self, Fetcher};
use crate::manifest::{AssetDescriptor, Manifest};

use super::classify::classify;
use super::limiter::IntervalLimiter;
use super::result::{AuditDetail, AuditError, AuditResult};

/// Where and how fast to audit.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub base_url: Url,
    pub workers: usize,
    pub interval: Duration,
}

impl AuditOptions {
    /// `base_url` is treated as a directory: a missing trailing slash is added so
    /// manifest entries join beneath it.
    pub fn new(base_url: &str, workers: usize, interval: Duration) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            workers: workers.max(1),
            interval,
        })
    }

    pub fn from_config(cfg: &AuditConfig) -> Result<Self, url::ParseError> {
        Self::new(&cfg.base_url, cfg.workers, cfg.interval())
    }

    /// Absolute URL for a manifest entry.
    pub fn asset_url(&self, asset: &AssetDescriptor) -> Result<Url, url::ParseError> {
        self.base_url.join(&asset.url)
    }
}

pub struct Auditor {
    fetcher: Arc<dyn Fetcher>,
    opts: AuditOptions,
    limiter: Arc<IntervalLimiter>,
}

impl Auditor {
    pub fn new(fetcher: Arc<dyn Fetcher>, opts: AuditOptions) -> Self {
        let limiter = Arc::new(IntervalLimiter::new(opts.interval));
        Self {
            fetcher,
            opts,
            limiter,
        }
    }

    pub fn options(&self) -> &AuditOptions {
        &self.opts
    }

    /// Audit every manifest entry. Never fails: problems become results.
    pub async fn run(&self, manifest: &Manifest) -> Vec<AuditResult> {
        self.run_with(manifest, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_result` as each asset finishes
    /// (completion order; manifest order when `workers == 1`).
    pub async fn run_with<F>(&self, manifest: &Manifest, mut on_result: F) -> Vec<AuditResult>
    where
        F: FnMut(&AuditResult),
    {
        let assets = manifest.assets();
        let mut slots: Vec<Option<AuditResult>> = vec![None; assets.len()];
        let mut join_set = tokio::task::JoinSet::new();
        let mut pending = assets.iter().cloned().enumerate();

        tracing::info!(
            base_url = %self.opts.base_url,
            assets = assets.len(),
            workers = self.opts.workers,
            interval_ms = self.opts.interval.as_millis() as u64,
            "audit started"
        );

        loop {
            while join_set.len() < self.opts.workers {
                let Some((index, asset)) = pending.next() else {
                    break;
                };
                let fetcher = Arc::clone(&self.fetcher);
                let limiter = Arc::clone(&self.limiter);
                let url = self.opts.asset_url(&asset);
                join_set.spawn(async move {
                    limiter.acquire().await;
                    let result = match url {
                        Ok(url) => {
                            let outcome = fetch::get_blocking(fetcher, url.to_string()).await;
                            classify(&asset, outcome)
                        }
                        Err(e) => AuditResult {
                            url: asset.url.clone(),
                            category: asset.category,
                            detail: AuditDetail::Error(AuditError::Network(format!(
                                "invalid URL: {}",
                                e
                            ))),
                        },
                    };
                    (index, result)
                });
            }

            let Some(joined) = join_set.join_next().await else {
                break;
            };
            match joined {
                Ok((index, result)) => {
                    tracing::debug!(url = %result.url, status = %result.status(), "audited");
                    on_result(&result);
                    slots[index] = Some(result);
                }
                Err(e) => tracing::warn!("audit task join: {}", e),
            }
        }

        slots
            .into_iter()
            .zip(assets)
            .map(|(slot, asset)| {
                slot.unwrap_or_else(|| AuditResult {
                    url: asset.url.clone(),
                    category: asset.category,
                    detail: AuditDetail::Error(AuditError::Network("audit task failed".into())),
                })
            })
            .collect()
    }
}
