//! Page-side effects of the shim: banners, injected styles and scripts.

use std::fmt;

/// Stylesheet injected when the page's real CSS bundle failed to load.
pub const FALLBACK_CSS: &str = r#"body { font-family: system-ui, sans-serif; margin: 0; padding: 1rem; background: #fff; color: #202124; }
.alert { padding: 0.75rem 1rem; margin-bottom: 1rem; border-radius: 4px; border: 1px solid transparent; }
.alert-error { background: #fdecea; border-color: #f5c2c0; color: #8a1c1c; }
.alert-warning { background: #fff8e1; border-color: #ffe08a; color: #7a5a00; }
.alert-success { background: #e6f4ea; border-color: #a8dab5; color: #1e6a32; }
.alert-info { background: #e8f0fe; border-color: #aecbfa; color: #174ea6; }
.spinner { display: inline-block; width: 1em; height: 1em; margin-right: 0.5em; border: 2px solid #ccc; border-top-color: #1a73e8; border-radius: 50%; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
"#;

/// Source label of the inline fallback stylesheet.
pub const FALLBACK_CSS_SOURCE: &str = "inline:fallback.css";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Error,
    Warning,
    Success,
    Info,
}

impl BannerLevel {
    fn class(self) -> &'static str {
        match self {
            BannerLevel::Error => "alert-error",
            BannerLevel::Warning => "alert-warning",
            BannerLevel::Success => "alert-success",
            BannerLevel::Info => "alert-info",
        }
    }

    fn label(self) -> &'static str {
        match self {
            BannerLevel::Error => "Error",
            BannerLevel::Warning => "Warning",
            BannerLevel::Success => "Success",
            BannerLevel::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
}

impl Banner {
    /// HTML for the banner element.
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"alert {}\"><strong>{}:</strong> {}</div>",
            self.level.class(),
            self.level.label(),
            self.message
        )
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level.label(), self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Css,
    Js,
}

/// Content placed into the page, with the URL it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    pub source: String,
    pub content: String,
}

/// What the shim has done to one page.
#[derive(Debug, Default)]
pub struct PageContext {
    banners: Vec<Banner>,
    styles: Vec<Injected>,
    scripts: Vec<Injected>,
}

impl PageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Banners, newest first (each new banner is inserted at the top of the page).
    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn styles(&self) -> &[Injected] {
        &self.styles
    }

    pub fn scripts(&self) -> &[Injected] {
        &self.scripts
    }

    pub fn show(&mut self, level: BannerLevel, message: impl Into<String>) {
        self.banners.insert(
            0,
            Banner {
                level,
                message: message.into(),
            },
        );
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.show(BannerLevel::Error, message);
    }

    pub fn show_warning(&mut self, message: impl Into<String>) {
        self.show(BannerLevel::Warning, message);
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.show(BannerLevel::Success, message);
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.show(BannerLevel::Info, message);
    }

    /// Uncaught script error: logged and shown, never swallowed.
    pub fn report_script_error(&mut self, message: &str) {
        tracing::error!("page script error: {}", message);
        self.show_error(format!("A JavaScript error occurred: {}", message));
    }

    pub fn inject(&mut self, kind: ResourceKind, source: &str, content: String) {
        let item = Injected {
            source: source.to_string(),
            content,
        };
        match kind {
            ResourceKind::Css => self.styles.push(item),
            ResourceKind::Js => self.scripts.push(item),
        }
    }

    /// Inject [`FALLBACK_CSS`] unless the real bundle loaded or it is already present.
    /// Returns true when the fallback was injected by this call.
    pub fn ensure_fallback_stylesheet(&mut self, css_loaded: bool) -> bool {
        if css_loaded || self.styles.iter().any(|s| s.source == FALLBACK_CSS_SOURCE) {
            return false;
        }
        self.inject(ResourceKind::Css, FALLBACK_CSS_SOURCE, FALLBACK_CSS.to_string());
        true
    }

    /// A `data-action` button was clicked.
    pub fn mock_action(&mut self, action: &str) {
        tracing::debug!(action, "mocked button action");
        self.show_info(format!("Action \"{}\" is mocked in this debug version", action));
    }

    /// A form was submitted.
    pub fn mock_form_submit(&mut self, action: &str) {
        tracing::debug!(action, "mocked form submit");
        self.show_warning("Form submission is mocked in this debug version");
    }
}
