//! Config management use case

use crate::domain::{ContentMode, PathLayout};
use crate::error::{DaylogError, Result};
use crate::infrastructure::{Config, MetadataStore, Workspace};
use std::str::FromStr;

/// Service for reading and changing workspace configuration
pub struct ConfigService {
    workspace: Workspace,
}

impl ConfigService {
    pub fn new(workspace: Workspace) -> Self {
        ConfigService { workspace }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.workspace.load_config()?;

        match key {
            "layout" => Ok(config.layout.to_string()),
            "content_mode" => Ok(config.content_mode.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(DaylogError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: layout, content_mode, created",
                key
            ))),
        }
    }

    /// Set a config value.
    ///
    /// The layout may only change while the workspace holds no entries:
    /// existing content paths are not rewritten.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.workspace.load_config()?;

        match key {
            "layout" => {
                let layout = PathLayout::from_str(value).map_err(DaylogError::Config)?;
                if layout != config.layout && !self.workspace.metadata_store()?.list()?.is_empty() {
                    return Err(DaylogError::Config(format!(
                        "Cannot switch layout from '{}' to '{}': existing entries use '{}' paths",
                        config.layout, layout, config.layout
                    )));
                }
                config.layout = layout;
            }
            "content_mode" => {
                config.content_mode = ContentMode::from_str(value).map_err(DaylogError::Config)?;
            }
            "created" => {
                return Err(DaylogError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(DaylogError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: layout, content_mode",
                    key
                )));
            }
        }

        self.workspace.save_config(&config)
    }

    /// Full configuration
    pub fn list(&self) -> Result<Config> {
        self.workspace.load_config()
    }
}
