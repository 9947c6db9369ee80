//! Configuration management

use crate::domain::{ContentMode, PathLayout};
use crate::error::{DaylogError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the workspace metadata directory
pub const DAYLOG_DIR: &str = ".daylog";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub layout: PathLayout,
    pub content_mode: ContentMode,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config stamped with the current time
    pub fn new(layout: PathLayout, content_mode: ContentMode) -> Self {
        Config {
            layout,
            content_mode,
            created: Utc::now(),
        }
    }

    /// Load config from .daylog/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(DAYLOG_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DaylogError::NotDaylogDirectory(path.to_path_buf())
            } else {
                DaylogError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| DaylogError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .daylog/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let daylog_dir = path.join(DAYLOG_DIR);
        let config_path = daylog_dir.join("config.toml");

        if !daylog_dir.exists() {
            fs::create_dir(&daylog_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| DaylogError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config() {
        let config = Config::new(PathLayout::Flat, ContentMode::Structured);
        assert_eq!(config.layout, PathLayout::Flat);
        assert_eq!(config.content_mode, ContentMode::Structured);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config::new(PathLayout::Nested, ContentMode::Verbatim);

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".daylog").exists());
        assert!(temp.path().join(".daylog/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_file_format() {
        let temp = TempDir::new().unwrap();
        Config::new(PathLayout::Flat, ContentMode::Structured)
            .save_to_dir(temp.path())
            .unwrap();

        let raw = fs::read_to_string(temp.path().join(".daylog/config.toml")).unwrap();
        assert!(raw.contains("layout = \"flat\""));
        assert!(raw.contains("content_mode = \"structured\""));
        assert!(raw.contains("created = "));
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            DaylogError::NotDaylogDirectory(_) => {}
            e => panic!("Expected NotDaylogDirectory error, got {}", e),
        }
    }

    #[test]
    fn test_load_rejects_unknown_layout() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".daylog")).unwrap();
        fs::write(
            temp.path().join(".daylog/config.toml"),
            "layout = \"spiral\"\ncontent_mode = \"verbatim\"\ncreated = \"2025-01-01T00:00:00Z\"\n",
        )
        .unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            DaylogError::Config(msg) => assert!(msg.contains("config.toml")),
            e => panic!("Expected Config error, got {}", e),
        }
    }
}
