//! User configuration, stored as `config.toml` in the data directory

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "STUDYLOOP_DATA_DIR";

const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Opaque identity that owns the topics created from this machine
    pub user_id: String,
    /// Where topics are stored; defaults to the data directory itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics_dir: Option<PathBuf>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            topics_dir: None,
        }
    }
}

fn default_user_id() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| "local".to_string())
}

impl StudyConfig {
    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        dirs::data_local_dir()
            .map(|p| p.join("studyloop"))
            .ok_or(ConfigError::DataDirNotFound)
    }

    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Load the config from `data_dir`, falling back to defaults when no
    /// file exists yet
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::config_path(data_dir);
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: StudyConfig = toml::from_str(&content)?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)?;
        let content = toml::to_string_pretty(self)?;
        fs::write(Self::config_path(data_dir), content)?;
        Ok(())
    }

    /// Directory the topic repository should use
    pub fn topics_dir(&self, data_dir: &Path) -> PathBuf {
        self.topics_dir
            .clone()
            .unwrap_or_else(|| data_dir.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = StudyConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, StudyConfig::default());
        assert!(!config.user_id.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config = StudyConfig {
            user_id: "alice".to_string(),
            topics_dir: Some(temp_dir.path().join("topics")),
        };

        config.save(temp_dir.path()).unwrap();
        let loaded = StudyConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.topics_dir(temp_dir.path()), temp_dir.path().join("topics"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(StudyConfig::config_path(temp_dir.path()), "user_id = \"bob\"\n").unwrap();

        let loaded = StudyConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.user_id, "bob");
        assert_eq!(loaded.topics_dir(temp_dir.path()), temp_dir.path());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(StudyConfig::config_path(temp_dir.path()), "user_id = [").unwrap();

        let err = StudyConfig::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
