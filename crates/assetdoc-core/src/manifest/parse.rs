//! TOML manifest file format.
//!
//! ```toml
//! [[asset]]
//! url = "css2(1)"
//! category = "css"
//! ```

use serde::{Deserialize, Serialize};

use super::AssetDescriptor;

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct ManifestFile {
    #[serde(default, rename = "asset")]
    pub assets: Vec<AssetDescriptor>,
}
