//! Web server command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use gc_bsd::{BsdClient, BsdConfig, RemoteDirectory, StaticDirectory};
use gc_core::AppContext;
use gc_db::{EntityStore, MemoryStore};
use tracing::warn;

use super::connect_store;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "GC_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "GC_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Keep all data in memory instead of Redis
    #[arg(long)]
    pub memory: bool,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (with --log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub bsd: BsdArgs,
}

#[derive(Args)]
pub struct BsdArgs {
    /// BSD instance host
    #[arg(long, env = "BSD_HOST")]
    pub bsd_host: Option<String>,

    /// BSD API id
    #[arg(long, env = "BSD_API_ID")]
    pub bsd_api_id: Option<String>,

    /// BSD API secret
    #[arg(long, env = "BSD_API_SECRET", hide_env_values = true)]
    pub bsd_api_secret: Option<String>,

    /// Timeout for BSD requests, in seconds
    #[arg(long, env = "BSD_TIMEOUT_SECS", default_value = "30")]
    pub bsd_timeout_secs: u64,
}

impl BsdArgs {
    /// The configured BSD instance, if host and credentials are all set.
    fn config(&self) -> Option<BsdConfig> {
        match (&self.bsd_host, &self.bsd_api_id, &self.bsd_api_secret) {
            (Some(host), Some(id), Some(secret)) => Some(
                BsdConfig::new(host, id, secret)
                    .with_timeout(Duration::from_secs(self.bsd_timeout_secs)),
            ),
            _ => None,
        }
    }
}

pub async fn execute(args: ServeArgs, redis_url: &str) -> Result<()> {
    let store: Arc<dyn EntityStore> = if args.memory {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(connect_store(redis_url).await?)
    };

    let directory: Arc<dyn RemoteDirectory> = match args.bsd.config() {
        Some(config) => Arc::new(BsdClient::new(config)),
        None => {
            warn!("BSD credentials not configured; remote lookups will find nothing");
            Arc::new(StaticDirectory::new())
        }
    };

    let bsd_host = args.bsd.bsd_host.clone().unwrap_or_default();
    let ctx = Arc::new(AppContext::new(store, directory, bsd_host));

    println!();
    println!("  {} {}", "Ground Control".cyan().bold(), "GraphQL Server".bold());
    println!();
    println!("  {}    http://{}:{}/graphql", "GraphQL".green(), args.host, args.port);
    println!("  {}     http://{}:{}/schema.graphql", "Schema".green(), args.host, args.port);
    println!(
        "  {}      {}",
        "Store".green(),
        if args.memory { "memory".to_string() } else { redis_url.to_string() }
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    gc_web::run_server(ctx, &args.host, args.port).await?;

    Ok(())
}
