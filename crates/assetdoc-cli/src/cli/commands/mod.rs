//! CLI command handlers, one per file.

mod audit;
mod completions;
mod man;
mod manifest;
mod serve;
mod shim;

pub use audit::run_audit;
pub use completions::run_completions;
pub use man::run_man;
pub use manifest::run_manifest;
pub use serve::run_serve;
pub use shim::run_shim;
