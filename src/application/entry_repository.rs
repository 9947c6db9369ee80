//! Entry repository: keeps the blob store and the metadata store consistent
//!
//! Creating an entry writes the body blob first and the metadata record
//! second. The two writes are not atomic: if the record insert fails the blob
//! stays behind with nothing referencing it. That orphan is reported, never
//! cleaned up here. No call is retried.

use crate::domain::{path_for_slug, ContentMode, Entry, EntryRecord, NewEntry, PathLayout};
use crate::error::{DaylogError, Result};
use crate::infrastructure::{BlobStore, Clock, Config, MetadataStore, MARKDOWN_CONTENT_TYPE};
use log::{error, info, warn};

/// Create, list and read entries across the two stores
pub struct EntryRepository<B, M, C> {
    blobs: B,
    metadata: M,
    clock: C,
    layout: PathLayout,
    content_mode: ContentMode,
}

impl<B, M, C> EntryRepository<B, M, C>
where
    B: BlobStore,
    M: MetadataStore,
    C: Clock,
{
    pub fn new(
        blobs: B,
        metadata: M,
        clock: C,
        layout: PathLayout,
        content_mode: ContentMode,
    ) -> Self {
        EntryRepository {
            blobs,
            metadata,
            clock,
            layout,
            content_mode,
        }
    }

    /// Repository using the layout and content mode recorded in `config`
    pub fn from_config(blobs: B, metadata: M, clock: C, config: &Config) -> Self {
        Self::new(blobs, metadata, clock, config.layout, config.content_mode)
    }

    pub fn layout(&self) -> PathLayout {
        self.layout
    }

    pub fn content_mode(&self) -> ContentMode {
        self.content_mode
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    /// Validate, store the body, then record the metadata.
    ///
    /// Returns the record as assigned by the metadata store.
    pub fn create_entry(&self, input: NewEntry) -> Result<Entry> {
        // 1-2. Validate and normalize; no store is touched on failure
        let validated = input.validate(self.content_mode).map_err(|err| {
            warn!(
                "event=entry_create module=repository status=rejected stage=validate error={}",
                err
            );
            err
        })?;

        // 3. Content address from the date and a fresh token
        let token = self.clock.token();
        let content_path = self.layout.content_path(validated.fields.date, token);

        // 4. Body
        let body = validated.content_source().render();

        // 5. Blob first; a failure here means nothing was recorded
        if let Err(err) = self
            .blobs
            .put(&content_path, body.as_bytes(), MARKDOWN_CONTENT_TYPE)
        {
            error!(
                "event=entry_create module=repository status=error stage=blob_put content_path={} error={}",
                content_path, err
            );
            return Err(DaylogError::Storage(err.to_string()));
        }

        // 6. Metadata; on failure the blob above is left unreferenced
        let record = EntryRecord::new(validated.fields, content_path.clone(), self.clock.now());
        let entry = self.metadata.insert(&record).map_err(|err| {
            error!(
                "event=entry_create module=repository status=error stage=metadata_insert \
                orphan_blob={} error={}",
                content_path, err
            );
            DaylogError::from(err)
        })?;

        info!(
            "event=entry_create module=repository status=ok id={} content_path={} attachments={} references={}",
            entry.id,
            entry.content_path,
            entry.attachments.len(),
            entry.references.len()
        );
        Ok(entry)
    }

    /// Every entry, newest date first. Fails as a whole.
    pub fn list_entries(&self) -> Result<Vec<Entry>> {
        match self.metadata.list() {
            Ok(entries) => {
                info!(
                    "event=entry_list module=repository status=ok count={}",
                    entries.len()
                );
                Ok(entries)
            }
            Err(err) => {
                error!(
                    "event=entry_list module=repository status=error error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Markdown body addressed by `slug` (a content path without `.md`)
    pub fn fetch_content(&self, slug: &str) -> Result<String> {
        let content_path = path_for_slug(slug);

        let bytes = self.blobs.get(&content_path).map_err(|err| {
            warn!(
                "event=content_fetch module=repository status=error content_path={} error={}",
                content_path, err
            );
            DaylogError::from(err)
        })?;

        let body = String::from_utf8(bytes).map_err(|err| {
            DaylogError::Storage(format!(
                "content at '{}' is not valid UTF-8: {}",
                content_path, err
            ))
        })?;

        info!(
            "event=content_fetch module=repository status=ok content_path={} bytes={}",
            content_path,
            body.len()
        );
        Ok(body)
    }
}
