//! Fetch CSS/JS for a page, refusing redirect stubs, with one fallback URL.

use std::sync::Arc;
use url::Url;

use crate::audit::is_redirect_stub;
use crate::fetch::{FetchError, Fetcher};

use super::page::{PageContext, ResourceKind};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("HTTP {0}")]
    Http(u32),
    #[error("resource contains redirect HTML")]
    RedirectStub,
}

/// Loaded/failed bookkeeping, as reported by the debug status command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderStatus {
    pub loaded: Vec<String>,
    pub failed: Vec<String>,
    pub total: usize,
}

/// Blocking loader; call from `spawn_blocking` in async code.
pub struct ResourceLoader {
    fetcher: Arc<dyn Fetcher>,
    base_url: Url,
    loaded: Vec<String>,
    failed: Vec<String>,
}

impl ResourceLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>, base_url: Url) -> Self {
        Self {
            fetcher,
            base_url,
            loaded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn load_css(&mut self, page: &mut PageContext, url: &str, fallback: Option<&str>) -> bool {
        self.load(page, ResourceKind::Css, url, fallback)
    }

    pub fn load_js(&mut self, page: &mut PageContext, url: &str, fallback: Option<&str>) -> bool {
        self.load(page, ResourceKind::Js, url, fallback)
    }

    /// Fetch `url` and inject it into `page`. On failure, try `fallback` once.
    pub fn load(
        &mut self,
        page: &mut PageContext,
        kind: ResourceKind,
        url: &str,
        fallback: Option<&str>,
    ) -> bool {
        match self.fetch_content(url) {
            Ok(content) => {
                page.inject(kind, url, content);
                record(&mut self.loaded, url);
                tracing::info!("{:?} loaded: {}", kind, url);
                true
            }
            Err(e) => {
                tracing::warn!("failed to load {:?} {}: {}", kind, url, e);
                record(&mut self.failed, url);
                match fallback {
                    Some(fb) => self.load(page, kind, fb, None),
                    None => false,
                }
            }
        }
    }

    fn fetch_content(&self, url: &str) -> Result<String, LoadError> {
        let absolute = self.base_url.join(url)?;
        let resp = self.fetcher.get(absolute.as_str())?;
        if !resp.is_success() {
            return Err(LoadError::Http(resp.status));
        }
        let text = resp.text().into_owned();
        if is_redirect_stub(&text) {
            return Err(LoadError::RedirectStub);
        }
        Ok(text)
    }

    pub fn status(&self) -> LoaderStatus {
        LoaderStatus {
            loaded: self.loaded.clone(),
            failed: self.failed.clone(),
            total: self.loaded.len() + self.failed.len(),
        }
    }
}

fn record(list: &mut Vec<String>, url: &str) {
    if !list.iter().any(|u| u == url) {
        list.push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchedResponse;
    use std::collections::HashMap;

    struct Canned(HashMap<&'static str, (u32, &'static str)>);

    impl Fetcher for Canned {
        fn get(&self, url: &str) -> Result<FetchedResponse, FetchError> {
            match self.0.get(url) {
                Some((status, body)) => Ok(FetchedResponse {
                    status: *status,
                    content_type: None,
                    body: body.as_bytes().to_vec(),
                }),
                None => Err(FetchError::Task(format!("no route to {}", url))),
            }
        }
    }

    fn loader() -> ResourceLoader {
        let mut routes = HashMap::new();
        routes.insert("http://localhost:8000/fixes.css", (200, ".alert{}"));
        routes.insert(
            "http://localhost:8000/css2(1)",
            (200, "<!DOCTYPE html><script>window.location='/'</script>"),
        );
        routes.insert("http://localhost:8000/app.js", (200, "console.log('ok')"));
        routes.insert("http://localhost:8000/gone.js", (404, "nope"));
        ResourceLoader::new(
            Arc::new(Canned(routes)),
            Url::parse("http://localhost:8000/").unwrap(),
        )
    }

    #[test]
    fn css_loaded_and_injected() {
        let mut l = loader();
        let mut page = PageContext::new();
        assert!(l.load_css(&mut page, "fixes.css", None));
        assert_eq!(page.styles()[0].content, ".alert{}");
        assert_eq!(l.status().loaded, ["fixes.css"]);
    }

    #[test]
    fn redirect_stub_rejected_then_fallback_used() {
        let mut l = loader();
        let mut page = PageContext::new();
        assert!(l.load_css(&mut page, "css2(1)", Some("fixes.css")));
        let status = l.status();
        assert_eq!(status.failed, ["css2(1)"]);
        assert_eq!(status.loaded, ["fixes.css"]);
        assert_eq!(status.total, 2);
        assert_eq!(page.styles().len(), 1);
    }

    #[test]
    fn http_error_without_fallback_fails() {
        let mut l = loader();
        let mut page = PageContext::new();
        assert!(!l.load_js(&mut page, "gone.js", None));
        assert!(page.scripts().is_empty());
        assert_eq!(l.status().failed, ["gone.js"]);
    }

    #[test]
    fn fallback_is_tried_only_once() {
        let mut l = loader();
        let mut page = PageContext::new();
        assert!(!l.load_js(&mut page, "gone.js", Some("missing.js")));
        assert_eq!(l.status().failed, ["gone.js", "missing.js"]);
    }

    #[test]
    fn repeated_loads_are_not_double_counted() {
        let mut l = loader();
        let mut page = PageContext::new();
        l.load_js(&mut page, "app.js", None);
        l.load_js(&mut page, "app.js", None);
        assert_eq!(l.status().total, 1);
        assert_eq!(page.scripts().len(), 2);
    }
}
