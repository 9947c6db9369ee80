//! Entry model, input validation and label normalization

use crate::domain::layout::slug_for_path;
use crate::domain::render::{ContentMode, ContentSource};
use crate::error::{DaylogError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored log entry as returned by the metadata store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque id assigned by the metadata store
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    /// Blob address of the markdown body; assigned once at creation
    pub content_path: String,
    pub attachments: Vec<String>,
    pub references: Vec<String>,
    pub external_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Public identifier for this entry's content
    pub fn slug(&self) -> &str {
        slug_for_path(&self.content_path)
    }
}

/// Unvalidated input for creating an entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub date: String,
    pub title: String,
    pub description: Option<String>,
    pub external_link: Option<String>,
    pub attachments: Vec<String>,
    pub references: Vec<String>,
    /// Complete markdown body; only accepted in verbatim mode
    pub body: Option<String>,
}

/// Validated, normalized entry metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    pub external_link: Option<String>,
    pub attachments: Vec<String>,
    pub references: Vec<String>,
}

/// A new entry that passed validation under a given content mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub fields: EntryFields,
    body: Option<String>,
}

impl ValidatedEntry {
    /// Where the markdown body comes from. Verbatim iff a body was validated.
    pub fn content_source(&self) -> ContentSource<'_> {
        match &self.body {
            Some(body) => ContentSource::Verbatim(body),
            None => ContentSource::Structured(&self.fields),
        }
    }
}

/// Metadata handed to the metadata store on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    pub content_path: String,
    pub attachments: Vec<String>,
    pub references: Vec<String>,
    pub external_link: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl EntryRecord {
    pub fn new(fields: EntryFields, content_path: String, updated_at: DateTime<Utc>) -> Self {
        EntryRecord {
            date: fields.date,
            title: fields.title,
            description: fields.description,
            content_path,
            attachments: fields.attachments,
            references: fields.references,
            external_link: fields.external_link,
            updated_at,
        }
    }
}

impl NewEntry {
    /// Check required fields and normalize labels.
    ///
    /// `mode` decides the accepted shape: verbatim requires a body, structured
    /// refuses one. Nothing is written anywhere.
    pub fn validate(self, mode: ContentMode) -> Result<ValidatedEntry> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DaylogError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        reject_line_breaks("title", title)?;
        let link = non_blank(self.external_link);
        if let Some(link) = &link {
            reject_line_breaks("external link", link)?;
        }
        let attachments = normalize_labels(self.attachments);
        let references = normalize_labels(self.references);
        for label in attachments.iter().chain(&references) {
            reject_line_breaks("attachment and reference labels", label)?;
        }

        let date = parse_entry_date(&self.date)?;

        let body = match (mode, self.body) {
            (ContentMode::Verbatim, Some(body)) if !body.trim().is_empty() => Some(body),
            (ContentMode::Verbatim, _) => {
                return Err(DaylogError::Validation(
                    "a markdown body is required in verbatim mode".to_string(),
                ))
            }
            (ContentMode::Structured, Some(_)) => {
                return Err(DaylogError::Validation(
                    "a markdown body cannot be supplied in structured mode; \
                    the body is generated from the entry fields"
                        .to_string(),
                ))
            }
            (ContentMode::Structured, None) => None,
        };

        Ok(ValidatedEntry {
            fields: EntryFields {
                date,
                title: title.to_string(),
                description: non_blank(self.description),
                external_link: link,
                attachments,
                references,
            },
            body,
        })
    }
}

/// Titles, links and labels each render on a single markdown line
fn reject_line_breaks(field: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(DaylogError::Validation(format!(
            "{} must not contain line breaks",
            field
        )));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Drop blank labels, keeping the survivors in their original order
pub fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    labels
        .into_iter()
        .filter(|label| !label.trim().is_empty())
        .collect()
}

/// Parse an entry date, keeping the calendar day as written.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times and naive `YYYY-MM-DDTHH:MM:SS`;
/// time of day and offset are discarded.
pub fn parse_entry_date(input: &str) -> Result<NaiveDate> {
    let date = parse_calendar_day(input.trim()).ok_or_else(|| {
        DaylogError::Validation(format!("'{}' is not a valid calendar date", input))
    })?;

    // Paths and the TEXT date column both assume a four-digit year
    if !(0..=9999).contains(&date.year()) {
        return Err(DaylogError::Validation(format!(
            "'{}' is outside the supported years 0000-9999",
            input
        )));
    }
    Ok(date)
}

fn parse_calendar_day(input: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Some(datetime.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|datetime| datetime.date())
}
