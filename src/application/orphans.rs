//! Orphan blob report
//!
//! A failed metadata insert leaves the already-written body in the blob
//! store. This lists such bodies; it never deletes anything.

use crate::domain::PathLayout;
use crate::error::Result;
use crate::infrastructure::{FileSystemBlobStore, MetadataStore};
use log::info;
use std::collections::HashSet;

/// Content paths present in `blobs` under `layout` that no record references
pub fn find_orphans<M: MetadataStore>(
    blobs: &FileSystemBlobStore,
    metadata: &M,
    layout: PathLayout,
) -> Result<Vec<String>> {
    let referenced: HashSet<String> = metadata
        .list()?
        .into_iter()
        .map(|entry| entry.content_path)
        .collect();

    let orphans: Vec<String> = blobs
        .list_paths()?
        .into_iter()
        .filter(|path| layout.parse_content_path(path).is_some())
        .filter(|path| !referenced.contains(path))
        .collect();

    info!(
        "event=orphan_scan module=orphans status=ok referenced={} orphans={}",
        referenced.len(),
        orphans.len()
    );
    Ok(orphans)
}
