//! Markdown body generation

use crate::domain::entry::EntryFields;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NO_LINK: &str = "Not specified";
const NO_DESCRIPTION: &str = "No description provided";
const NO_ATTACHMENTS: &str = "No attachments";
const NO_REFERENCES: &str = "No references";

/// How entry bodies are produced. Fixed per workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    /// The caller writes the whole markdown body
    #[default]
    Verbatim,
    /// The body is generated from the entry's fields
    Structured,
}

/// Resolved source of an entry body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource<'a> {
    Verbatim(&'a str),
    Structured(&'a EntryFields),
}

impl ContentSource<'_> {
    /// Produce the markdown body. Never fails.
    pub fn render(&self) -> String {
        match self {
            ContentSource::Verbatim(body) => body.to_string(),
            ContentSource::Structured(fields) => render_structured(fields),
        }
    }
}

fn render_structured(fields: &EntryFields) -> String {
    format!(
        "# {title}\n\n\
        **Date:** {date}\n\
        **External Link:** {link}\n\n\
        ## Description\n\n\
        {description}\n\n\
        ## Attachments\n\n\
        {attachments}\n\n\
        ## References\n\n\
        {references}\n",
        title = fields.title,
        date = fields.date.format("%Y-%m-%d"),
        link = fields.external_link.as_deref().unwrap_or(NO_LINK),
        description = fields.description.as_deref().unwrap_or(NO_DESCRIPTION),
        attachments = bullet_list(&fields.attachments, NO_ATTACHMENTS),
        references = bullet_list(&fields.references, NO_REFERENCES),
    )
}

fn bullet_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }

    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentMode::Verbatim => write!(f, "verbatim"),
            ContentMode::Structured => write!(f, "structured"),
        }
    }
}

impl FromStr for ContentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbatim" => Ok(ContentMode::Verbatim),
            "structured" => Ok(ContentMode::Structured),
            _ => Err(format!(
                "Invalid content mode: '{}'. Valid modes are: verbatim, structured",
                s
            )),
        }
    }
}
