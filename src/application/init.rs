//! Initialize workspace use case

use crate::domain::{ContentMode, PathLayout};
use crate::error::Result;
use crate::infrastructure::{Config, Workspace};
use std::fs;
use std::path::Path;

/// Initialize a new workspace at `path`, creating the directory if needed.
pub fn init(path: &Path, layout: PathLayout, content_mode: ContentMode) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let workspace = Workspace::new(path.to_path_buf());
    let config = Config::new(layout, content_mode);
    workspace.initialize(&config)?;

    Ok(config)
}
