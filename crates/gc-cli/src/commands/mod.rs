//! CLI command definitions and handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gc_bsd::StaticDirectory;
use gc_core::AppContext;
use gc_db::RedisStore;

pub mod event;
pub mod group;
pub mod schema;
pub mod serve;

/// Ground Control - phonebanking and event organizing backend
#[derive(Parser)]
#[command(name = "ground-control")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Redis connection URL
    #[arg(long, global = true, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the GraphQL server
    Serve(serve::ServeArgs),

    /// Print the GraphQL schema
    Schema,

    /// Manage call groups
    #[command(subcommand)]
    Group(group::GroupCommands),

    /// Manage events
    #[command(subcommand)]
    Event(event::EventCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args, &self.redis_url).await,
            Commands::Schema => schema::execute(),
            Commands::Group(cmd) => group::execute(cmd, &self.redis_url).await,
            Commands::Event(cmd) => event::execute(cmd, &self.redis_url).await,
        }
    }
}

/// Connect to the Redis store the admin commands write to.
pub(crate) async fn connect_store(redis_url: &str) -> Result<RedisStore> {
    gc_db::connect_redis(redis_url)
        .await
        .with_context(|| format!("Failed to connect to Redis at {}", redis_url))
}

/// Context for the admin commands: the Redis store, no remote directory.
pub(crate) async fn admin_context(redis_url: &str) -> Result<AppContext> {
    let store = connect_store(redis_url).await?;
    let bsd_host = std::env::var("BSD_HOST").unwrap_or_default();
    Ok(AppContext::new(
        Arc::new(store),
        Arc::new(StaticDirectory::new()),
        bsd_host,
    ))
}
