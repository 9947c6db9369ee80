//! Output formatting utilities

use crate::domain::{date_from_slug, Entry};

/// Format a list of entries for display
pub fn format_entry_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{}  {}  {}\n",
            entry.date.format("%Y-%m-%d"),
            entry.slug(),
            entry.title
        ));
    }
    output
}

/// Format entries with their stored metadata, one block per entry
pub fn format_entry_details(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!(
            "{}  {}  {}\n",
            entry.date.format("%Y-%m-%d"),
            entry.slug(),
            entry.title
        ));
        output.push_str(&format!(
            "    description: {}\n",
            entry.description.as_deref().unwrap_or("none")
        ));
        output.push_str(&format!(
            "    link: {}\n",
            entry.external_link.as_deref().unwrap_or("none")
        ));
        push_labels(&mut output, "attachments", &entry.attachments, "file");
        push_labels(&mut output, "references", &entry.references, "ref");
    }
    output
}

fn push_labels(output: &mut String, heading: &str, labels: &[String], unit: &str) {
    let plural = if labels.len() == 1 { "" } else { "s" };
    output.push_str(&format!(
        "    {}: {} {}{}\n",
        heading,
        labels.len(),
        unit,
        plural
    ));
    for label in labels {
        output.push_str(&format!("      - {}\n", label));
    }
}

/// Entry count summary; a filtered view counts matches, otherwise the total
pub fn format_entry_count(count: usize, filtered: bool) -> String {
    let noun = if count == 1 { "entry" } else { "entries" };
    if filtered {
        format!("{} {}", count, noun)
    } else {
        format!("{} total {}", count, noun)
    }
}

/// Body for `show`, optionally headed by the date recovered from the slug
pub fn format_show(slug: &str, body: &str, header: bool) -> String {
    match (header, date_from_slug(slug)) {
        (true, Some(date)) => format!("{}\n\n{}", date.format("%B %d, %Y"), body),
        _ => body.to_string(),
    }
}
