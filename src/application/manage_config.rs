//! Config management use case

use crate::error::{HabitError, Result};
use crate::infrastructure::{Config, FileSystemRepository, HabitRepository};

/// Service for managing tracker configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "name" => Ok(config.name),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(HabitError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: name, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "name" => {
                let name = value.trim();
                if name.is_empty() {
                    return Err(HabitError::Config("Habit name cannot be empty".to_string()));
                }
                config.name = name.to_string();
            }
            "created" => {
                return Err(HabitError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(HabitError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: name",
                    key
                )));
            }
        }

        self.repository.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
