//! Default build options shared by the scanner's consumers.
//!
//! The scanner itself only needs source text; these settings describe where
//! sources live and what the downstream build should do with them. Keys use
//! camelCase so existing option files deserialize unchanged, and any missing
//! key falls back to its default.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    #[default]
    Classic,
    Module,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultOptions {
    /// Directory that module paths are resolved against
    pub base: Option<String>,
    pub date: Option<String>,
    /// Regex; matching modules are left out of the build order
    pub exclude: Option<String>,
    /// Per-entry overrides, keyed by entry path relative to `base`
    pub file_options: HashMap<String, FileOptions>,
    /// Entry files relative to `base`; every source file when unset
    pub files: Option<Vec<String>>,
    pub js_base: Option<String>,
    pub output: String,
    pub palette: Option<String>,
    pub pretty: bool,
    pub product: String,
    pub umd: bool,
    pub version: String,
    pub transpile: bool,
    #[serde(rename = "type")]
    pub build_type: BuildType,
}

impl Default for DefaultOptions {
    fn default() -> Self {
        Self {
            base: None,
            date: None,
            exclude: None,
            file_options: HashMap::new(),
            files: None,
            js_base: None,
            output: "./".to_string(),
            palette: None,
            pretty: true,
            product: "Highcharts".to_string(),
            umd: true,
            version: "x.x.x".to_string(),
            transpile: false,
            build_type: BuildType::Classic,
        }
    }
}

/// Settings a single entry may override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileOptions {
    pub exclude: Option<String>,
    pub product: Option<String>,
    pub version: Option<String>,
    pub umd: Option<bool>,
    pub pretty: Option<bool>,
    pub transpile: Option<bool>,
    #[serde(rename = "type")]
    pub build_type: Option<BuildType>,
}

impl DefaultOptions {
    /// Options for one entry file: its `file_options` entry layered over these.
    pub fn options_for(&self, file: &str) -> DefaultOptions {
        let mut merged = self.clone();
        let Some(overrides) = self.file_options.get(file) else {
            return merged;
        };
        if let Some(exclude) = &overrides.exclude {
            merged.exclude = Some(exclude.clone());
        }
        if let Some(product) = &overrides.product {
            merged.product = product.clone();
        }
        if let Some(version) = &overrides.version {
            merged.version = version.clone();
        }
        merged.umd = overrides.umd.unwrap_or(merged.umd);
        merged.pretty = overrides.pretty.unwrap_or(merged.pretty);
        merged.transpile = overrides.transpile.unwrap_or(merged.transpile);
        merged.build_type = overrides.build_type.unwrap_or(merged.build_type);
        merged
    }
}
