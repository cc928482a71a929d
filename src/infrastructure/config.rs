//! Configuration management

use crate::error::{HabitError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the directory marking a habitlog root
pub const HABITLOG_DIR: &str = ".habitlog";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display name of the tracked habit
    #[serde(default = "default_name")]
    pub name: String,
    pub created: DateTime<Utc>,
}

fn default_name() -> String {
    "habit".to_string()
}

impl Config {
    /// Create a new config with default values
    pub fn new(name: Option<String>) -> Self {
        Config {
            name: name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(default_name),
            created: Utc::now(),
        }
    }

    /// Load config from .habitlog/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(HABITLOG_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HabitError::NotHabitDirectory(path.to_path_buf())
            } else {
                HabitError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| HabitError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .habitlog/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let dir = path.join(HABITLOG_DIR);

        if !dir.exists() {
            fs::create_dir(&dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| HabitError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(dir.join(CONFIG_FILE), contents)?;

        Ok(())
    }
}
