//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daylog")]
#[command(about = "Personal log of dated markdown entries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log level (off, error, warn, info, debug, trace); overrides DAYLOG_LOG
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new log
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Content path layout (nested, flat); fixed once entries exist
        #[arg(long, default_value = "nested")]
        layout: String,

        /// How entry bodies are produced (verbatim, structured)
        #[arg(long = "content", default_value = "verbatim")]
        content_mode: String,
    },

    /// Create an entry
    Add {
        /// Entry date (e.g., 2025-08-08)
        #[arg(long)]
        date: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        description: Option<String>,

        /// Optional external link carried with the entry
        #[arg(long)]
        link: Option<String>,

        /// Attachment label (repeatable)
        #[arg(long = "attach", value_name = "LABEL")]
        attachments: Vec<String>,

        /// Reference label (repeatable)
        #[arg(long = "ref", value_name = "LABEL")]
        references: Vec<String>,

        /// Markdown body (verbatim mode)
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the markdown body from a file, or stdin with '-' (verbatim mode)
        #[arg(long, value_name = "FILE")]
        body_file: Option<PathBuf>,
    },

    /// List entries, newest first
    List {
        /// Only entries on this date (e.g., 2025-08-08)
        #[arg(long, value_name = "DATE")]
        on: Option<String>,

        /// Maximum number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Also print description, link, attachments and references
        #[arg(short, long)]
        long: bool,
    },

    /// Print the markdown body of an entry
    Show {
        /// Entry slug as printed by 'daylog list'
        slug: String,

        /// Prefix the body with the date encoded in the slug
        #[arg(long)]
        header: bool,
    },

    /// List stored bodies that no entry references
    Orphans,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
