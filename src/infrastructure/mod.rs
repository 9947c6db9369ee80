//! Infrastructure layer - Stores, configuration and other external I/O

pub mod blob_store;
pub mod clock;
pub mod config;
pub mod logging;
pub mod metadata_store;
pub mod workspace;

pub use blob_store::{BlobStore, FileSystemBlobStore, MemoryBlobStore, MARKDOWN_CONTENT_TYPE};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use metadata_store::{MemoryMetadataStore, MetadataStore, SqliteMetadataStore};
pub use workspace::Workspace;
