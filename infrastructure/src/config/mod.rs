//! Configuration file loading for AskEdith
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./askedith.toml` or `./.askedith.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/askedith/config.toml`
//! 4. Fallback: `~/.config/askedith/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    CatalogSource, ConfigIssue, FileCatalogConfig, FileConfig, FileDeliveryConfig,
    FileMailboxConfig, FileOutputConfig, FileTransactionalConfig, FileWizardConfig, Severity,
};
pub use loader::{ConfigError, ConfigLoader};
