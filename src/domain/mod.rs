//! Domain layer - Entry model, path layouts, rendering and filtering

pub mod entry;
pub mod filter;
pub mod layout;
pub mod render;

pub use entry::{parse_entry_date, Entry, EntryFields, EntryRecord, NewEntry, ValidatedEntry};
pub use filter::{filter_by_date, CalendarDay};
pub use layout::{date_from_slug, path_for_slug, slug_for_path, PathLayout};
pub use render::{ContentMode, ContentSource};
