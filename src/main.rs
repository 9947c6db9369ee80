use clap::Parser;
use daylog::application::{find_orphans, init::init, list_entries, open_repository, ConfigService};
use daylog::cli::{
    format_entry_count, format_entry_details, format_entry_list, format_show, Cli, Commands,
};
use daylog::domain::{parse_entry_date, ContentMode, NewEntry, PathLayout};
use daylog::error::{DaylogError, Result};
use daylog::infrastructure::logging::{init_logging, resolve_level};
use daylog::infrastructure::Workspace;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();

    let level = resolve_level(cli.log_level.as_deref());
    if let Err(msg) = init_logging(&level) {
        let err = DaylogError::Config(msg);
        eprintln!("Error: {}", err.display_with_suggestions());
        std::process::exit(err.exit_code());
    }

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn read_body(body: Option<String>, body_file: Option<&Path>) -> Result<Option<String>> {
    match body_file {
        Some(path) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(Some(buf))
        }
        Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
        None => Ok(body),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init {
            path,
            layout,
            content_mode,
        } => {
            let layout = PathLayout::from_str(&layout).map_err(DaylogError::Config)?;
            let content_mode = ContentMode::from_str(&content_mode).map_err(DaylogError::Config)?;

            init(&path, layout, content_mode)?;

            println!("Initialized daylog at {}", path.display());
            println!("Layout: {}", layout);
            println!("Content: {}", content_mode);
            Ok(())
        }
        Commands::Add {
            date,
            title,
            description,
            link,
            attachments,
            references,
            body,
            body_file,
        } => {
            let workspace = Workspace::discover()?;
            let repository = open_repository(&workspace)?;

            let input = NewEntry {
                date,
                title,
                description,
                external_link: link,
                attachments,
                references,
                body: read_body(body, body_file.as_deref())?,
            };

            let entry = repository.create_entry(input)?;
            println!("{}", entry.slug());
            Ok(())
        }
        Commands::List { on, limit, long } => {
            let on = on.as_deref().map(parse_entry_date).transpose()?;

            let workspace = Workspace::discover()?;
            let repository = open_repository(&workspace)?;
            let entries = list_entries(&repository, on, limit)?;

            let listing = if long {
                format_entry_details(&entries)
            } else {
                format_entry_list(&entries)
            };

            if entries.is_empty() {
                println!("{}", listing);
            } else {
                print!("{}", listing);
                println!();
                println!("{}", format_entry_count(entries.len(), on.is_some()));
            }
            Ok(())
        }
        Commands::Show { slug, header } => {
            let workspace = Workspace::discover()?;
            let repository = open_repository(&workspace)?;

            let body = repository.fetch_content(&slug)?;
            print!("{}", format_show(&slug, &body, header));
            Ok(())
        }
        Commands::Orphans => {
            let workspace = Workspace::discover()?;
            let config = workspace.load_config()?;
            let metadata = workspace.metadata_store()?;

            let orphans = find_orphans(&workspace.blob_store(), &metadata, config.layout)?;
            if orphans.is_empty() {
                println!("No orphaned content found");
            } else {
                for path in &orphans {
                    println!("{}", path);
                }
            }
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let workspace = Workspace::discover()?;
            let service = ConfigService::new(workspace);

            if list {
                let config = service.list()?;
                println!("layout = {}", config.layout);
                println!("content_mode = {}", config.content_mode);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    println!("{}", service.get(&k)?);
                    Ok(())
                }
            } else {
                println!("Usage: daylog config [--list | <key> [<value>]]");
                println!("Valid keys: layout, content_mode, created");
                Ok(())
            }
        }
    }
}
