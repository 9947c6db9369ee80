//! Application layer - Use cases and orchestration

pub mod entry_repository;
pub mod init;
pub mod list_entries;
pub mod manage_config;
pub mod orphans;

pub use entry_repository::EntryRepository;
pub use list_entries::list_entries;
pub use manage_config::ConfigService;
pub use orphans::find_orphans;

use crate::error::Result;
use crate::infrastructure::{FileSystemBlobStore, SqliteMetadataStore, SystemClock, Workspace};

/// Repository over a workspace's on-disk stores
pub type WorkspaceRepository = EntryRepository<FileSystemBlobStore, SqliteMetadataStore, SystemClock>;

/// Open the stores of `workspace` with its configured layout and content mode
pub fn open_repository(workspace: &Workspace) -> Result<WorkspaceRepository> {
    let config = workspace.load_config()?;
    Ok(EntryRepository::from_config(
        workspace.blob_store(),
        workspace.metadata_store()?,
        SystemClock::new(),
        &config,
    ))
}
