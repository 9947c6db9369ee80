//! List entries use case

use crate::application::entry_repository::EntryRepository;
use crate::domain::{filter_by_date, Entry};
use crate::error::Result;
use crate::infrastructure::{BlobStore, Clock, MetadataStore};
use chrono::NaiveDate;

/// List entries newest first, optionally only those on `on`, capped at `limit`.
pub fn list_entries<B, M, C>(
    repository: &EntryRepository<B, M, C>,
    on: Option<NaiveDate>,
    limit: Option<usize>,
) -> Result<Vec<Entry>>
where
    B: BlobStore,
    M: MetadataStore,
    C: Clock,
{
    let mut entries = repository.list_entries()?;

    if let Some(day) = on {
        entries = filter_by_date(&entries, &day).into_iter().cloned().collect();
    }

    if let Some(n) = limit {
        entries.truncate(n);
    }

    Ok(entries)
}
