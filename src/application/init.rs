//! Initialize tracker use case

use crate::domain::{export, BackupDocument};
use crate::error::{HabitError, Result};
use crate::infrastructure::{Config, FileSystemRepository, HabitRepository, Storage};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new habit tracker at the specified path.
pub fn init(path: &Path, name: Option<String>) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    if repo.is_initialized() {
        return Err(HabitError::Config(format!(
            "Directory already initialized: {}",
            path.display()
        )));
    }
    repo.initialize()?;

    let config = Config::new(name);
    repo.save_config(&config)?;

    let empty = export::to_json(&BackupDocument::default())?;
    repo.data_storage().save(empty.as_bytes())?;

    info!(root = %path.display(), name = %config.name, "initialized tracker");
    Ok(config)
}
