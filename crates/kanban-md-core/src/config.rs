//! Configuration handling for kanban-md

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::KanbanError;

/// File name looked up next to a board
pub const BOARD_CONFIG_FILE: &str = "kanban-md.toml";

/// kanban-md configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Board handling settings
    #[serde(default)]
    pub kanban: KanbanConfig,
}

/// Board handling settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KanbanConfig {
    /// Read column include files while parsing
    #[serde(default = "default_true")]
    pub resolve_includes: bool,

    /// Collapse duplicate row tags when formatting
    #[serde(default = "default_true")]
    pub cleanup_rows_on_format: bool,

    /// Run automatic sorting when formatting
    #[serde(default)]
    pub sort_on_format: bool,
}

fn default_true() -> bool {
    true
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            resolve_includes: true,
            cleanup_rows_on_format: true,
            sort_on_format: false,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, KanbanError> {
        toml::from_str(content).map_err(|e| KanbanError::Config(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load_from_path(path: &Path) -> Result<Self, KanbanError> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| KanbanError::FileNotFound(path.display().to_string()))?;
        toml::from_str(&content)
            .map_err(|e| KanbanError::Config(format!("{}: {}", path.display(), e)))
    }
}
