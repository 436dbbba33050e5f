//! Event commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use gc_db::EventDetails;

use super::admin_context;
use crate::output;

#[derive(Subcommand)]
pub enum EventCommands {
    /// Import events from a JSON array of event records
    Import(ImportArgs),

    /// List all events
    List,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Path to the JSON file
    pub file: PathBuf,
}

pub async fn execute(cmd: EventCommands, redis_url: &str) -> Result<()> {
    let ctx = admin_context(redis_url).await?;

    match cmd {
        EventCommands::Import(args) => {
            let raw = std::fs::read_to_string(&args.file)
                .with_context(|| format!("Failed to read {}", args.file.display()))?;
            let records: Vec<EventDetails> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of events", args.file.display()))?;

            let events = gc_core::event::import_events(&ctx, &records).await?;
            println!(
                "{} Imported {} event(s)",
                "✓".green().bold(),
                events.len().to_string().cyan()
            );
        }

        EventCommands::List => {
            let events = gc_core::event::list_events(&ctx).await?;
            output::print_events_table(&events);
        }
    }

    Ok(())
}
