//! CLI administration tool for url-dispatch.
//!
//! Registers and inspects short URLs and performs database checks without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a short URL (prompts for missing values)
//! cargo run --bin admin -- link create --url https://example.com --method get
//!
//! # Show a short URL and its access counter
//! cargo run --bin admin -- link show 9f86d081884c
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)
//! - `BASE_URL`, `DEFAULT_TTL_SECONDS` (optional, same defaults as the server)

use url_dispatch::application::services::ShortUrlService;
use url_dispatch::config::Config;
use url_dispatch::domain::clock::SystemClock;
use url_dispatch::domain::expiration::is_expired;
use url_dispatch::domain::repositories::MetricsRepository;
use url_dispatch::infrastructure::persistence::{PgMetricsRepository, PgShortUrlRepository};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Select};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-dispatch.
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
    /// Manage short URLs
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Short URL subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Register a new short URL
    Create {
        /// Original URL (prompted if omitted)
        #[arg(short, long)]
        url: Option<String>,

        /// Bound HTTP method: get or post (prompted if omitted)
        #[arg(short, long)]
        method: Option<String>,

        /// Lifetime in seconds (server default if omitted)
        #[arg(short, long)]
        ttl: Option<i64>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a short URL and its access counter
    Show {
        /// Short URL identifier
        identifier: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL (or DB_USER, DB_PASSWORD and DB_NAME) must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches short URL commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let service = ShortUrlService::new(
        Arc::new(PgShortUrlRepository::new(pool.clone())),
        Arc::new(SystemClock),
        config.default_ttl_seconds,
        config.base_url.clone(),
    );

    match action {
        LinkAction::Create {
            url,
            method,
            ttl,
            yes,
        } => {
            let ttl_label = match ttl {
                Some(ttl) => format!("{}s", ttl),
                None => format!("{}s (default)", config.default_ttl_seconds),
            };
            create_link(&service, url, method, ttl, &ttl_label, yes).await
        }
        LinkAction::Show { identifier } => {
            show_link(&service, &PgMetricsRepository::new(pool), &identifier).await
        }
    }
}

/// Registers a short URL.
///
/// # Process
///
/// 1. Prompt for URL and method if not provided
/// 2. Display the request
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Register through the same service the HTTP API uses
async fn create_link(
    service: &ShortUrlService<PgShortUrlRepository>,
    url: Option<String>,
    method: Option<String>,
    ttl: Option<i64>,
    ttl_label: &str,
    yes: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Short URL".bright_blue().bold());
    println!();

    let original_url = match url {
        Some(url) => url,
        None => Input::new()
            .with_prompt("Original URL")
            .interact_text()
            .context("Failed to read URL")?,
    };

    let method = match method {
        Some(method) => method,
        None => {
            let methods = ["GET", "POST"];
            let selection = Select::new()
                .with_prompt("Bound HTTP method")
                .items(&methods)
                .default(0)
                .interact()
                .context("Failed to read method")?;
            methods[selection].to_string()
        }
    };

    println!("  URL:    {}", original_url.cyan());
    println!("  Method: {}", method.to_uppercase().cyan());
    println!("  TTL:    {}", ttl_label);
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Create this short URL?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let short_url = service
        .create_short_url(&original_url, &method, ttl)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!();
    println!("{}", "✅ Short URL created successfully!".green().bold());
    println!();
    println!(
        "  Short URL: {}",
        service
            .short_url_for(&short_url.identifier)
            .bright_yellow()
            .bold()
    );
    println!("  Expires:   {}", format_timestamp(short_url.expires_at));
    println!();

    Ok(())
}

/// Prints a short URL with its expiry state and access counter.
async fn show_link(
    service: &ShortUrlService<PgShortUrlRepository>,
    metrics: &PgMetricsRepository,
    identifier: &str,
) -> Result<()> {
    let short_url = match service.get_short_url(identifier).await {
        Ok(short_url) => short_url,
        Err(e) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            return Ok(());
        }
    };

    let now = Utc::now().timestamp();
    let expired = is_expired(short_url.expires_at, now);

    println!("{}", "🔗 Short URL".bright_blue().bold());
    println!();
    println!("  Identifier: {}", short_url.identifier.cyan());
    println!("  URL:        {}", short_url.original_url);
    println!("  Method:     {}", short_url.http_method.to_string().cyan());
    println!("  Created:    {}", format_timestamp(short_url.created_at));
    println!(
        "  Expires:    {} {}",
        format_timestamp(short_url.expires_at),
        if expired {
            "(expired)".red()
        } else {
            format!("(active, {}s left)", short_url.remaining_ttl(now)).green()
        }
    );

    match metrics
        .find_by_identifier(identifier)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?
    {
        Some(metric) => {
            println!(
                "  Accesses:   {}",
                metric.access_count.to_string().bright_green().bold()
            );
            println!(
                "  Last:       {}",
                metric.last_accessed.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        None => println!("  Accesses:   {}", "0".bright_black()),
    }
    println!();

    Ok(())
}

fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// Displays service statistics.
///
/// Shows:
/// - Total number of short URLs
/// - Number of short URLs not yet expired
/// - Total recorded accesses
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
        .fetch_one(pool)
        .await?;

    let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls WHERE expires_at >= $1")
        .bind(Utc::now().timestamp())
        .fetch_one(pool)
        .await?;

    let accesses: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(access_count), 0)::BIGINT FROM access_metrics")
            .fetch_one(pool)
            .await?;

    println!("  Short URLs: {}", total.to_string().bright_green().bold());
    println!("  Active:     {}", active.to_string().bright_green().bold());
    println!("  Accesses:   {}", accesses.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
