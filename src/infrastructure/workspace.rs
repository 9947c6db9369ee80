//! Workspace discovery and store wiring
//!
//! A workspace is a directory holding `.daylog/`. Entry bodies are stored
//! under the workspace root at their content path; metadata lives in
//! `.daylog/entries.db`.

use crate::error::{DaylogError, Result};
use crate::infrastructure::blob_store::FileSystemBlobStore;
use crate::infrastructure::config::{Config, DAYLOG_DIR};
use crate::infrastructure::metadata_store::SqliteMetadataStore;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the workspace root
pub const DAYLOG_ROOT_ENV: &str = "DAYLOG_ROOT";

const DATABASE_FILE: &str = "entries.db";

#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    pub fn new(root: PathBuf) -> Self {
        Workspace { root }
    }

    /// Locate the workspace: DAYLOG_ROOT first, then walk up from the
    /// current directory
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(DAYLOG_ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_daylog_dir(&path) {
                return Ok(Workspace::new(path));
            } else {
                return Err(DaylogError::Config(format!(
                    "DAYLOG_ROOT is set to '{}' but no .daylog directory found. \
                    Run 'daylog init' in that directory or unset DAYLOG_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` until a directory containing .daylog is found
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_daylog_dir(&current) {
                return Ok(Workspace::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(DaylogError::NotDaylogDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_daylog_dir(path: &Path) -> bool {
        path.join(DAYLOG_DIR).is_dir()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_daylog_dir(&self.root)
    }

    /// Create .daylog and write the initial config
    pub fn initialize(&self, config: &Config) -> Result<()> {
        let daylog_dir = self.root.join(DAYLOG_DIR);

        if daylog_dir.exists() {
            return Err(DaylogError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&daylog_dir)?;
        config.save_to_dir(&self.root)?;
        // Create the schema up front so a fresh workspace lists cleanly
        self.metadata_store()?;

        info!(
            "event=workspace_init module=workspace status=ok layout={} content_mode={} root={}",
            config.layout,
            config.content_mode,
            self.root.display()
        );
        Ok(())
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    /// Blob store rooted at the workspace directory
    pub fn blob_store(&self) -> FileSystemBlobStore {
        FileSystemBlobStore::new(self.root.clone())
    }

    /// Metadata store backed by .daylog/entries.db
    pub fn metadata_store(&self) -> Result<SqliteMetadataStore> {
        let path = self.root.join(DAYLOG_DIR).join(DATABASE_FILE);
        Ok(SqliteMetadataStore::open(path)?)
    }
}
