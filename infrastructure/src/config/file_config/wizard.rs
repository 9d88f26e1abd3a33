//! Wizard configuration from TOML (`[wizard]` section)

use serde::{Deserialize, Serialize};

/// Raw wizard configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWizardConfig {
    /// Show progress indicators during batch sends
    pub show_progress: bool,
    /// Path to the prompt history file
    pub history_file: Option<String>,
}

impl Default for FileWizardConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}
