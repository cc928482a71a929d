//! File system repository

use crate::error::{HabitError, Result};
use crate::infrastructure::config::HABITLOG_DIR;
use crate::infrastructure::{Config, FileStorage};
use std::fs;
use std::path::{Path, PathBuf};

const DATA_FILE: &str = "data.json";

/// Abstract repository for a habit tracker root
pub trait HabitRepository {
    /// Load configuration from .habitlog/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .habitlog/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .habitlog directory exists
    fn is_initialized(&self) -> bool;

    /// Create .habitlog directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of HabitRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the tracker root.
    /// HABITLOG_ROOT wins when set; otherwise walk up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("HABITLOG_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_habitlog_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(HabitError::Config(format!(
                    "HABITLOG_ROOT is set to '{}' but no .habitlog directory found. \
                    Run 'habitlog init' in that directory or unset HABITLOG_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the tracker root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_habitlog_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| HabitError::NotHabitDirectory(start.to_path_buf()))
    }

    fn has_habitlog_dir(path: &Path) -> bool {
        path.join(HABITLOG_DIR).is_dir()
    }

    /// Storage backing the entry collection and goal
    pub fn data_storage(&self) -> FileStorage {
        FileStorage::new(self.root.join(HABITLOG_DIR).join(DATA_FILE))
    }
}

impl HabitRepository for FileSystemRepository {
    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_habitlog_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        fs::create_dir(self.root.join(HABITLOG_DIR))?;
        Ok(())
    }
}
