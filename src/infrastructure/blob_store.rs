//! Path-addressed blob storage for entry bodies

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;
use walkdir::WalkDir;

/// Content type for entry bodies
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("no object at '{0}'")]
    NotFound(String),

    #[error("an object already exists at '{0}'")]
    AlreadyExists(String),

    #[error("invalid blob path '{0}'")]
    InvalidPath(String),

    #[error("I/O failure at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("blob backend failure: {0}")]
    Backend(String),
}

pub type BlobResult<T> = std::result::Result<T, BlobError>;

/// Byte-oriented object store addressed by relative path
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at `path`. Paths are written once; existing objects are kept.
    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> BlobResult<()>;

    /// Fetch the bytes stored at `path`
    fn get(&self, path: &str) -> BlobResult<Vec<u8>>;
}

/// Accept only canonical relative paths: `/`-separated, no empty, `.`, `..`
/// or hidden segments. One object has exactly one spelling.
fn check_path(path: &str) -> BlobResult<()> {
    let canonical = !path.is_empty()
        && !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && !segment.starts_with('.'));

    if canonical {
        Ok(())
    } else {
        Err(BlobError::InvalidPath(path.to_string()))
    }
}

/// Blob store rooted at a local directory
#[derive(Debug, Clone)]
pub struct FileSystemBlobStore {
    root: PathBuf,
}

impl FileSystemBlobStore {
    pub fn new(root: PathBuf) -> Self {
        FileSystemBlobStore { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn io_error(path: &str, source: io::Error) -> BlobError {
        BlobError::Io {
            path: path.to_string(),
            source,
        }
    }

    /// Relative paths of every markdown file under the root,
    /// skipping dot-directories. Not part of the [`BlobStore`] contract.
    pub fn list_paths(&self) -> BlobResult<Vec<String>> {
        let mut paths = Vec::new();

        let walker = WalkDir::new(&self.root).into_iter().filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| !name.starts_with('.'))
        });

        for entry in walker {
            let entry = entry.map_err(|e| BlobError::Backend(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let parts: Option<Vec<&str>> = rel.iter().map(|part| part.to_str()).collect();
            let Some(parts) = parts else {
                continue;
            };
            let rel = parts.join("/");
            if rel.ends_with(".md") {
                paths.push(rel);
            }
        }

        paths.sort();
        Ok(paths)
    }
}

impl BlobStore for FileSystemBlobStore {
    fn put(&self, path: &str, bytes: &[u8], _content_type: &str) -> BlobResult<()> {
        check_path(path)?;
        let full = self.root.join(path);

        if let Some(parent) = full.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| Self::io_error(path, e))?;
            }
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    BlobError::AlreadyExists(path.to_string())
                } else {
                    Self::io_error(path, e)
                }
            })?;

        if let Err(e) = file.write_all(bytes).and_then(|_| file.sync_all()) {
            drop(file);
            // Leave no half-written object behind
            let _ = fs::remove_file(&full);
            return Err(Self::io_error(path, e));
        }

        Ok(())
    }

    fn get(&self, path: &str) -> BlobResult<Vec<u8>> {
        check_path(path)?;
        fs::read(self.root.join(path)).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                BlobError::NotFound(path.to_string())
            } else {
                Self::io_error(path, e)
            }
        })
    }
}

#[derive(Debug, Clone)]
struct StoredBlob {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-process blob store
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: RwLock<HashMap<String, StoredBlob>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content type recorded for `path`, if an object exists there
    pub fn content_type(&self, path: &str) -> Option<String> {
        let objects = self.objects.read().ok()?;
        objects.get(path).map(|blob| blob.content_type.clone())
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> BlobResult<()> {
        check_path(path)?;
        let mut objects = self
            .objects
            .write()
            .map_err(|_| BlobError::Backend("blob map lock poisoned".to_string()))?;

        if objects.contains_key(path) {
            return Err(BlobError::AlreadyExists(path.to_string()));
        }

        objects.insert(
            path.to_string(),
            StoredBlob {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn get(&self, path: &str) -> BlobResult<Vec<u8>> {
        check_path(path)?;
        let objects = self
            .objects
            .read()
            .map_err(|_| BlobError::Backend("blob map lock poisoned".to_string()))?;

        objects
            .get(path)
            .map(|blob| blob.bytes.clone())
            .ok_or_else(|| BlobError::NotFound(path.to_string()))
    }
}
