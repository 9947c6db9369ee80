//! Entry metadata storage
//!
//! Records live in a single `daily_entries` collection. Listing is always a
//! full read ordered by `date` descending; entries sharing a date are ordered
//! by `created_at` descending and then by insertion order, newest first.

use crate::domain::{Entry, EntryRecord};
use chrono::{DateTime, NaiveDate, Utc};
use log::{error, info};
use rusqlite::{params, Connection, Row};
use std::cmp::Reverse;
use std::path::Path;
use std::sync::{Mutex, RwLock};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid stored entry data: {0}")]
    InvalidData(String),

    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },

    #[error("metadata backend failure: {0}")]
    Backend(String),
}

pub type MetadataResult<T> = std::result::Result<T, MetadataError>;

/// Structured record collection holding entry metadata
pub trait MetadataStore: Send + Sync {
    /// Insert a record; the store assigns `id` and `created_at`.
    fn insert(&self, record: &EntryRecord) -> MetadataResult<Entry>;

    /// Every record, `date` descending.
    fn list(&self) -> MetadataResult<Vec<Entry>>;
}

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: "CREATE TABLE daily_entries (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            date TEXT NOT NULL,
            title TEXT NOT NULL CHECK (length(trim(title)) > 0),
            description TEXT,
            content_path TEXT NOT NULL UNIQUE,
            attachments TEXT NOT NULL DEFAULT '[]',
            \"references\" TEXT NOT NULL DEFAULT '[]',
            external_link TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
          );
          CREATE INDEX idx_daily_entries_date ON daily_entries(date);",
}];

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    date,
    title,
    description,
    content_path,
    attachments,
    \"references\",
    external_link,
    created_at,
    updated_at
FROM daily_entries";

fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

fn apply_migrations(conn: &mut Connection) -> MetadataResult<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if current > latest {
        return Err(MetadataError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;
    Ok(())
}

/// SQLite-backed metadata store
pub struct SqliteMetadataStore {
    conn: Mutex<Connection>,
}

impl SqliteMetadataStore {
    /// Open (creating if needed) the database file and apply pending migrations
    pub fn open(path: impl AsRef<Path>) -> MetadataResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|err| {
            error!(
                "event=metadata_open module=metadata_store status=error mode=file error={}",
                err
            );
            MetadataError::from(err)
        })?;
        let store = Self::bootstrap(conn)?;
        info!(
            "event=metadata_open module=metadata_store status=ok mode=file path={}",
            path.display()
        );
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> MetadataResult<Self> {
        let store = Self::bootstrap(Connection::open_in_memory()?)?;
        info!("event=metadata_open module=metadata_store status=ok mode=memory");
        Ok(store)
    }

    fn bootstrap(mut conn: Connection) -> MetadataResult<Self> {
        apply_migrations(&mut conn)?;
        Ok(SqliteMetadataStore {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> MetadataResult<T>) -> MetadataResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| MetadataError::Backend("connection lock poisoned".to_string()))?;
        f(&conn)
    }
}

fn encode_labels(labels: &[String]) -> MetadataResult<String> {
    serde_json::to_string(labels).map_err(|e| MetadataError::InvalidData(e.to_string()))
}

fn decode_labels(column: &str, raw: &str) -> MetadataResult<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| MetadataError::InvalidData(format!("{} is not a string list: {}", column, e)))
}

fn decode_timestamp(column: &str, millis: i64) -> MetadataResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| MetadataError::InvalidData(format!("{} out of range: {}", column, millis)))
}

struct RawEntry {
    id: String,
    date: String,
    title: String,
    description: Option<String>,
    content_path: String,
    attachments: String,
    references: String,
    external_link: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl RawEntry {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            content_path: row.get(4)?,
            attachments: row.get(5)?,
            references: row.get(6)?,
            external_link: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    fn into_entry(self) -> MetadataResult<Entry> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| MetadataError::InvalidData(format!("date '{}': {}", self.date, e)))?;

        Ok(Entry {
            id: self.id,
            date,
            title: self.title,
            description: self.description,
            content_path: self.content_path,
            attachments: decode_labels("attachments", &self.attachments)?,
            references: decode_labels("references", &self.references)?,
            external_link: self.external_link,
            created_at: decode_timestamp("created_at", self.created_at)?,
            updated_at: decode_timestamp("updated_at", self.updated_at)?,
        })
    }
}

impl MetadataStore for SqliteMetadataStore {
    fn insert(&self, record: &EntryRecord) -> MetadataResult<Entry> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().timestamp_millis();
        let attachments = encode_labels(&record.attachments)?;
        let references = encode_labels(&record.references)?;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO daily_entries (
                    id, date, title, description, content_path,
                    attachments, \"references\", external_link, created_at, updated_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
                params![
                    id,
                    record.date.format("%Y-%m-%d").to_string(),
                    record.title,
                    record.description,
                    record.content_path,
                    attachments,
                    references,
                    record.external_link,
                    created_at,
                    record.updated_at.timestamp_millis(),
                ],
            )?;

            let raw = conn.query_row(
                &format!("{} WHERE id = ?1;", ENTRY_SELECT_SQL),
                params![id],
                RawEntry::from_row,
            )?;
            raw.into_entry()
        })
    }

    fn list(&self) -> MetadataResult<Vec<Entry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{} ORDER BY date DESC, created_at DESC, seq DESC;",
                ENTRY_SELECT_SQL
            ))?;
            let rows = stmt.query_map([], RawEntry::from_row)?;

            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?.into_entry()?);
            }
            Ok(entries)
        })
    }
}

/// In-process metadata store
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    records: RwLock<Vec<Entry>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for MemoryMetadataStore {
    fn insert(&self, record: &EntryRecord) -> MetadataResult<Entry> {
        let mut records = self
            .records
            .write()
            .map_err(|_| MetadataError::Backend("record lock poisoned".to_string()))?;

        if records.iter().any(|e| e.content_path == record.content_path) {
            return Err(MetadataError::Backend(format!(
                "content_path already recorded: {}",
                record.content_path
            )));
        }

        let entry = Entry {
            id: Uuid::new_v4().to_string(),
            date: record.date,
            title: record.title.clone(),
            description: record.description.clone(),
            content_path: record.content_path.clone(),
            attachments: record.attachments.clone(),
            references: record.references.clone(),
            external_link: record.external_link.clone(),
            created_at: Utc::now(),
            updated_at: record.updated_at,
        };
        records.push(entry.clone());
        Ok(entry)
    }

    fn list(&self) -> MetadataResult<Vec<Entry>> {
        let records = self
            .records
            .read()
            .map_err(|_| MetadataError::Backend("record lock poisoned".to_string()))?;

        let mut ordered: Vec<(usize, &Entry)> = records.iter().enumerate().collect();
        ordered.sort_by_key(|(seq, e)| (Reverse(e.date), Reverse(e.created_at), Reverse(*seq)));
        Ok(ordered.into_iter().map(|(_, e)| e.clone()).collect())
    }
}
