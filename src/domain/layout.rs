//! Content path layouts and slug conversion

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Extension every content path carries
pub const CONTENT_EXTENSION: &str = ".md";

/// How content paths are laid out in the blob store.
///
/// A workspace commits to one layout when it is initialized; slugs produced
/// under one layout do not resolve under the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathLayout {
    /// Year and month directories (YYYY/MM/YYYY-MM-DD-<token>.md)
    #[default]
    Nested,
    /// Everything at the top level (YYYY-MM-DD-<token>.md)
    Flat,
}

/// Leaf name: YYYY-MM-DD-<token>.md
fn leaf_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-(\d+)$").unwrap())
}

impl PathLayout {
    /// Derive the content path for an entry dated `date` created with `token`.
    pub fn content_path(&self, date: NaiveDate, token: i64) -> String {
        let leaf = format!("{}-{}{}", date.format("%Y-%m-%d"), token, CONTENT_EXTENSION);
        match self {
            PathLayout::Nested => format!("{}/{}", date.format("%Y/%m"), leaf),
            PathLayout::Flat => leaf,
        }
    }

    /// Split a content path back into its date and token.
    /// Returns None if the path was not produced by this layout.
    pub fn parse_content_path(&self, path: &str) -> Option<(NaiveDate, i64)> {
        let stem = path.strip_suffix(CONTENT_EXTENSION)?;

        let leaf = match self {
            PathLayout::Flat => stem,
            PathLayout::Nested => stem.rsplit_once('/')?.1,
        };

        let (date, token) = parse_leaf(leaf)?;
        // Directories must match the leaf date exactly, padding included
        if self.content_path(date, token) == path {
            Some((date, token))
        } else {
            None
        }
    }
}

fn parse_leaf(leaf: &str) -> Option<(NaiveDate, i64)> {
    let caps = leaf_regex().captures(leaf)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let token: i64 = caps[4].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(|d| (d, token))
}

/// Public slug for a content path (the path without its extension)
pub fn slug_for_path(content_path: &str) -> &str {
    content_path
        .strip_suffix(CONTENT_EXTENSION)
        .unwrap_or(content_path)
}

/// Content path addressed by a public slug
pub fn path_for_slug(slug: &str) -> String {
    format!("{}{}", slug, CONTENT_EXTENSION)
}

/// Recover the entry date encoded in a slug's final segment
pub fn date_from_slug(slug: &str) -> Option<NaiveDate> {
    let leaf = slug.rsplit('/').next()?;
    parse_leaf(leaf).map(|(date, _)| date)
}

impl fmt::Display for PathLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathLayout::Nested => write!(f, "nested"),
            PathLayout::Flat => write!(f, "flat"),
        }
    }
}

impl FromStr for PathLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nested" => Ok(PathLayout::Nested),
            "flat" => Ok(PathLayout::Flat),
            _ => Err(format!(
                "Invalid layout: '{}'. Valid layouts are: nested, flat",
                s
            )),
        }
    }
}
