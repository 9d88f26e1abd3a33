//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; every section and field has a default so
//! any subset of the file may be present.

mod catalog;
mod delivery;
mod mailbox;
mod output;
mod transactional;
mod wizard;

pub use catalog::{CatalogSource, FileCatalogConfig};
pub use delivery::FileDeliveryConfig;
pub use mailbox::FileMailboxConfig;
pub use output::FileOutputConfig;
pub use transactional::FileTransactionalConfig;
pub use wizard::FileWizardConfig;

use serde::{Deserialize, Serialize};

/// How bad a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The named piece falls back to a default or stays disabled
    Warning,
    /// The value cannot be used at all
    Error,
}

/// One problem found while validating the configuration
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub message: String,
}

impl ConfigIssue {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Batch delivery settings
    pub delivery: FileDeliveryConfig,
    /// Transactional mail provider
    pub transactional: FileTransactionalConfig,
    /// Connected-mailbox provider
    pub mailbox: FileMailboxConfig,
    /// Resource catalog source
    pub catalog: FileCatalogConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Wizard settings
    pub wizard: FileWizardConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Issues never abort startup: a `Warning` means the affected piece
    /// falls back to its default, an `Error` means it stays disabled.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.delivery.send_timeout_seconds == Some(0) {
            issues.push(ConfigIssue::warning(
                "delivery.send_timeout_seconds cannot be 0; using the default",
            ));
        }

        // A key without a sender (or vice versa) leaves the transactional
        // transport unusable, which is easy to miss until a batch falls
        // back to simulation.
        if self.transactional.api_key.is_some() && self.transactional.from_address.is_none() {
            issues.push(ConfigIssue::warning(
                "transactional.api_key is set but transactional.from_address is missing; \
                 the transactional transport stays disabled",
            ));
        }
        if self.transactional.from_address.is_some() && self.transactional.api_key.is_none() {
            issues.push(ConfigIssue::warning(format!(
                "transactional.from_address is set without transactional.api_key; \
                 the key must come from ${} at runtime",
                self.transactional.api_key_env
            )));
        }

        if self.catalog.source == CatalogSource::Http && self.catalog.base_url.is_none() {
            issues.push(ConfigIssue::error(
                "catalog.base_url is required when catalog.source = \"http\"; \
                 falling back to the seed catalog",
            ));
        }

        if self.mailbox.base_url.is_empty() {
            issues.push(ConfigIssue::error(
                "mailbox.base_url cannot be empty; the mailbox transport stays disabled",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[delivery]
send_timeout_seconds = 10

[transactional]
api_key = "SG.test"
from_address = "hello@askedith.org"
from_name = "AskEdith"

[mailbox]
api_key = "nyk_test"

[catalog]
source = "http"
base_url = "https://directory.askedith.org"

[output]
color = false

[wizard]
show_progress = false
history_file = "~/.local/share/askedith/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.delivery.send_timeout_seconds, Some(10));
        assert_eq!(config.transactional.api_key.as_deref(), Some("SG.test"));
        assert_eq!(
            config.transactional.from_address.as_deref(),
            Some("hello@askedith.org")
        );
        assert_eq!(config.catalog.source, CatalogSource::Http);
        assert!(!config.output.color);
        assert!(!config.wizard.show_progress);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[transactional]
from_name = "AskEdith"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.transactional.from_name.as_deref(), Some("AskEdith"));
        // Defaults should apply
        assert_eq!(config.transactional.api_key_env, "SENDGRID_API_KEY");
        assert_eq!(config.catalog.source, CatalogSource::Seed);
        assert!(config.output.color);
        assert!(config.wizard.show_progress);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert_eq!(config.catalog.source, CatalogSource::Seed);
        assert!(config.mailbox.base_url.contains("nylas"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_flags_key_without_sender() {
        let toml_str = r#"
[transactional]
api_key = "SG.test"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("from_address"));
    }

    #[test]
    fn test_validate_flags_http_catalog_without_base_url() {
        let toml_str = r#"
[catalog]
source = "http"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("catalog.base_url"));
    }

    #[test]
    fn test_validate_flags_zero_timeout() {
        let toml_str = r#"
[delivery]
send_timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("send_timeout_seconds"));
    }
}
