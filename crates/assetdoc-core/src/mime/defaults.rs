//! Built-in MIME tables for the snapshot.

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";
pub const TEXT_CSS: &str = "text/css";
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript";

/// Extension (no dot, lowercase) -> content type.
pub const EXTENSIONS: &[(&str, &str)] = &[
    ("html", TEXT_HTML),
    ("htm", TEXT_HTML),
    ("css", TEXT_CSS),
    ("js", APPLICATION_JAVASCRIPT),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("ico", "image/x-icon"),
];

/// Captured filenames that have no usable extension, or a `(n)` suffix the browser
/// added when saving duplicates.
pub const LITERALS: &[(&str, &str)] = &[
    ("css2(2)", TEXT_CSS),
    ("css2(3)", TEXT_CSS),
    ("css2(1)", TEXT_CSS),
    ("css2", TEXT_CSS),
    ("index-KzK_8K8B.css", TEXT_CSS),
    ("js", APPLICATION_JAVASCRIPT),
    ("index-BMgX3D-v.js.download", APPLICATION_JAVASCRIPT),
    ("googleapis.proxy.js.download", APPLICATION_JAVASCRIPT),
    ("lazy.min.js.download", APPLICATION_JAVASCRIPT),
    ("cb=gapi.loaded_0", APPLICATION_JAVASCRIPT),
    ("cb=gapi.loaded_1", APPLICATION_JAVASCRIPT),
    ("cb=gapi(1).loaded_0", APPLICATION_JAVASCRIPT),
];
