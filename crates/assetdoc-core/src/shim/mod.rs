//! Fallback shim for pages whose third-party SDKs or bundles are missing.
//!
//! [`SdkBindings`] supplies stub SDKs for the slots a caller leaves empty,
//! [`ResourceLoader`] fetches CSS/JS with a fallback URL, and [`PageContext`] collects
//! what the shim did to the page (injected resources, banners).

mod bindings;
mod loader;
mod page;
mod sdk;

pub use bindings::{SdkBindings, SdkBindingsBuilder};
pub use loader::{LoadError, LoaderStatus, ResourceLoader};
pub use page::{
    Banner, BannerLevel, Injected, PageContext, ResourceKind, FALLBACK_CSS, FALLBACK_CSS_SOURCE,
};
pub use sdk::{
    ApiLoader, AuthProvider, CodeEditor, DocumentStore, EditorHost, Profile, SdkError,
    StubApiLoader, StubAuth, StubEditorHost, StubStore, TextBufferEditor, User,
};

/// Stylesheet the pages link for fixes; loaded before falling back to [`FALLBACK_CSS`].
pub const FIXES_CSS: &str = "fixes.css";
