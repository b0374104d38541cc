//! CLI administration tool for url-shortener.
//!
//! Talks to the configured record store directly, without going through the
//! HTTP API. Reads the same environment variables as the server.
//!
//! # Usage
//!
//! ```bash
//! # Check store connectivity
//! cargo run --bin admin -- store check
//!
//! # Apply PostgreSQL migrations
//! cargo run --bin admin -- store migrate
//!
//! # Shorten a URL
//! cargo run --bin admin -- link create https://example.com/some/long/path
//!
//! # Show a record and its clicks
//! cargo run --bin admin -- link show abc12345
//! ```

use url_shortener::config::{self, Config};
use url_shortener::domain::repositories::RecordStore;
use url_shortener::infrastructure::store::{PgRecordStore, StoreBackend};
use url_shortener::server::{build_service, connect_store};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Record store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },

    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },
}

/// Store diagnostic subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,

    /// Apply database migrations (postgres backend only)
    Migrate,
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Long URL to shorten (http or https)
        url: String,
    },

    /// Show a short link and its click count
    Show {
        /// Short code
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Store { action } => handle_store_action(action, &config).await?,
        Commands::Link { action } => handle_link_action(action, &config).await?,
    }

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_store_action(action: StoreAction, config: &Config) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!(
                "{}",
                format!("🔍 Checking {} store...", config.store_backend).bright_blue()
            );

            match config.store_backend {
                // Connecting through PgRecordStore directly skips migrations
                StoreBackend::Postgres => {
                    let url = config
                        .database_url
                        .as_deref()
                        .context("DATABASE_URL must be set")?;
                    let store = PgRecordStore::connect(url, 1, config.store_timeout()).await?;
                    ping(&store).await?;
                }
                _ => ping(connect_store(config).await?.as_ref()).await?,
            }

            println!("{}", "✅ Store connection OK".green().bold());
        }
        StoreAction::Migrate => {
            if config.store_backend != StoreBackend::Postgres {
                println!(
                    "{}",
                    format!(
                        "⚠️  The {} backend has no schema to migrate",
                        config.store_backend
                    )
                    .yellow()
                );
                return Ok(());
            }

            println!("{}", "🛠️  Applying migrations...".bright_blue());

            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            let store = PgRecordStore::connect(url, 1, config.store_timeout()).await?;
            store.migrate().await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

/// Pings the store under its configured timeout.
async fn ping(store: &dyn RecordStore) -> Result<()> {
    store
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Store unreachable: {}", e))
}

/// Handles link commands.
async fn handle_link_action(action: LinkAction, config: &Config) -> Result<()> {
    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "⚠️  Using the memory backend, nothing outlives this command".yellow()
        );
    }

    let store = connect_store(config).await?;
    let service = build_service(config, store);

    match action {
        LinkAction::Create { url } => {
            let record = service
                .shorten(&url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

            println!("{}", "✅ Short link created".green().bold());
            println!();
            println!("  Code:      {}", record.short_code.cyan());
            println!(
                "  Short URL: {}",
                service.short_url(&record.short_code).bright_yellow().bold()
            );
            println!("  Long URL:  {}", record.long_url.bright_white());
            println!();
        }
        LinkAction::Show { code } => {
            let record = service
                .lookup(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to look up '{}': {}", code, e))?;

            println!("{}", "🔗 Short link".bright_blue().bold());
            println!();
            println!("  Code:      {}", record.short_code.cyan());
            println!("  Long URL:  {}", record.long_url.bright_white());
            println!(
                "  Created:   {}",
                record
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
            println!(
                "  Clicks:    {}",
                record.clicks.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
