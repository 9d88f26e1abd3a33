//! Resource catalog configuration from TOML (`[catalog]` section)

use serde::{Deserialize, Serialize};

/// Where resource listings come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Built-in seed entries, no network
    #[default]
    Seed,
    /// Remote directory service
    Http,
}

/// Raw catalog configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    pub source: CatalogSource,
    /// Directory service base URL; required when `source = "http"`
    pub base_url: Option<String>,
}
