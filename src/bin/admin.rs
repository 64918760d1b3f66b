//! Administration CLI for price-m2.
//!
//! ```bash
//! # Download the cadastral archive and replace every record
//! cargo run --bin admin -- pull-prices
//!
//! # Load a local archive without prompting
//! cargo run --bin admin -- pull-prices --archive catastro.zip -y
//!
//! # Run one aggregation against the database
//! cargo run --bin admin -- calculate 1430 avg --construction-type 4
//!
//! # Table counts, admin password hash, connection checks
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- hash-password
//! cargo run --bin admin -- db check
//! ```
//!
//! Reads the same environment as the server (see `price_m2::config`).

use price_m2::application::services::ingest_service::{format_failed_rows, parse_catastro};
use price_m2::application::services::{AdminService, IngestService, PriceM2CalculatorFactory};
use price_m2::config::{self, Config};
use price_m2::domain::diagnostics::TracingSink;
use price_m2::infrastructure::catastro;
use price_m2::infrastructure::persistence::{
    PgBoroughRepository, PgCadastralRepository, PgConstructionTypeRepository,
};
use price_m2::server::{connect_cache, connect_pool};
use price_m2::web::middleware::admin_auth::hash_password;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the cadastral archive and replace every stored record
    PullPrices {
        /// Archive URL (defaults to PRICE_M2_CATASTRO_URL)
        #[arg(long, conflicts_with = "archive")]
        url: Option<String>,

        /// Read a local zip archive instead of downloading
        #[arg(long)]
        archive: Option<PathBuf>,

        /// Where rows that could not be loaded are written
        #[arg(long, default_value = "failed_rows.txt")]
        failed_rows: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Compute one aggregation
    Calculate {
        zip_code: String,

        /// avg, max or min
        aggregate: String,

        #[arg(short = 't', long)]
        construction_type: i64,
    },

    /// Show table counts
    Stats,

    /// Print the SHA-256 of a password for ADMIN_PASSWORD_SHA256
    HashPassword,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

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

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match Cli::parse().command {
        Commands::HashPassword => handle_hash_password(),
        command => run_with_database(command).await,
    }
}

async fn run_with_database(command: Commands) -> Result<()> {
    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match command {
        Commands::PullPrices {
            url,
            archive,
            failed_rows,
            yes,
        } => handle_pull_prices(&config, pool, url, archive, failed_rows, yes).await,
        Commands::Calculate {
            zip_code,
            aggregate,
            construction_type,
        } => handle_calculate(pool, &zip_code, &aggregate, construction_type).await,
        Commands::Stats => handle_stats(pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
        Commands::HashPassword => handle_hash_password(),
    }
}

/// Replaces the cadastral records with the content of the archive.
///
/// Rows that fail to parse are written to `failed_rows` and skipped. The
/// destructive replace runs in one transaction after confirmation.
async fn handle_pull_prices(
    config: &Config,
    pool: PgPool,
    url: Option<String>,
    archive: Option<PathBuf>,
    failed_rows: PathBuf,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Pull cadastral prices".bright_blue().bold());
    println!();

    let started_at = Utc::now();
    let pool = Arc::new(pool);
    let service = IngestService::new(
        Arc::new(PgBoroughRepository::new(pool.clone())),
        Arc::new(PgConstructionTypeRepository::new(pool.clone())),
        Arc::new(PgCadastralRepository::new(pool)),
    );

    let context = service.prepare().await?;
    println!(
        "  Borough:            {} (id {})",
        context.borough.name.cyan(),
        context.borough.id
    );

    let bytes = match archive {
        Some(path) => {
            println!("  Archive:            {}", path.display());
            catastro::read_local(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let url = url.unwrap_or_else(|| config.catastro_url.clone());
            println!("  Downloading:        {}", url);
            catastro::download(&url).await?
        }
    };

    println!(
        "  Files in archive:   {}",
        catastro::list_files(&bytes)?.join(", ")
    );
    let file = catastro::extract_single(&bytes)?;

    let parsed = parse_catastro(&context, file.content.as_slice())?;

    println!();
    println!(
        "  Processed rows:     {}",
        parsed.processed().to_string().bright_white()
    );
    println!(
        "  Successful rows:    {}",
        parsed.records.len().to_string().bright_green()
    );
    println!(
        "  Failed rows:        {}",
        parsed.failed.len().to_string().bright_red()
    );

    if !parsed.failed.is_empty() {
        tokio::fs::write(&failed_rows, format_failed_rows(&parsed.failed))
            .await
            .with_context(|| format!("Failed to write {}", failed_rows.display()))?;
        println!("  Failed rows saved:  {}", failed_rows.display());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete every stored record and load these rows?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let report = service.replace(parsed, started_at).await?;

    let cache = connect_cache(config).await;
    cache.invalidate_all().await.ok();

    println!();
    println!(
        "{} {} records loaded in {}s",
        "✓".green().bold(),
        report.inserted.to_string().bright_green().bold(),
        (report.finished_at - report.started_at).num_seconds()
    );

    Ok(())
}

/// Runs the fixed-kind calculator selected by `aggregate`.
async fn handle_calculate(
    pool: PgPool,
    zip_code: &str,
    aggregate: &str,
    construction_type: i64,
) -> Result<()> {
    let repository = Arc::new(PgCadastralRepository::new(Arc::new(pool)));
    let factory = PriceM2CalculatorFactory::new(repository, Arc::new(TracingSink));

    let calculator = factory.create(aggregate);
    let result = calculator.calculate(zip_code, construction_type).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn handle_stats(pool: PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool);
    let service = AdminService::new(
        Arc::new(PgBoroughRepository::new(pool.clone())),
        Arc::new(PgConstructionTypeRepository::new(pool.clone())),
        Arc::new(PgCadastralRepository::new(pool)),
    );

    let summary = service
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Boroughs:           {}",
        summary.boroughs.to_string().bright_green().bold()
    );
    println!(
        "  Construction types: {}",
        summary.construction_types.to_string().bright_green().bold()
    );
    println!(
        "  Cadastral records:  {}",
        summary.records.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

fn handle_hash_password() -> Result<()> {
    let password = Password::new()
        .with_prompt("Admin password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    println!();
    println!("ADMIN_PASSWORD_SHA256={}", hash_password(&password));
    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✓ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let applied: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
