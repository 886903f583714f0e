//! CLI administration tool for customer-dedup.
//!
//! Provides commands for loading data, running reports and performing
//! database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Replace stored records with the sample data set
//! cargo run --bin admin -- seed
//!
//! # Load another file on top of existing records
//! cargo run --bin admin -- seed --file exports/hubspot.json --keep-existing
//!
//! # Run reports
//! cargo run --bin admin -- analyze
//! cargo run --bin admin -- compare
//!
//! # Delete all records
//! cargo run --bin admin -- clear
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection string

use customer_dedup::api::dto::customer::BulkUploadRequest;
use customer_dedup::application::services::{CustomerService, ReconciliationService};
use customer_dedup::config::Config;
use customer_dedup::domain::entities::{NewCustomer, SourceSystem};
use customer_dedup::infrastructure::persistence::PgCustomerRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;
use validator::Validate;

const DEFAULT_SEED_FILE: &str = "data/sample_customers.json";

/// CLI tool for managing customer-dedup.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Load customer records from a JSON file
    Seed {
        /// File in bulk upload format (`{"customers": [...]}`)
        #[arg(short, long, default_value = DEFAULT_SEED_FILE)]
        file: PathBuf,

        /// Keep stored records instead of clearing them first
        #[arg(long)]
        keep_existing: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show unique customers and duplicates across sources
    Analyze,

    /// Compare customer ids between sources
    Compare,

    /// Delete all customer records
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("Database is not configured")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let repo = Arc::new(PgCustomerRepository::new(Arc::new(pool.clone())));

    match cli.command {
        Commands::Seed {
            file,
            keep_existing,
            yes,
        } => seed(repo, file, keep_existing, yes).await?,
        Commands::Analyze => analyze(repo).await?,
        Commands::Compare => compare(repo).await?,
        Commands::Clear { yes } => clear(repo, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Loads records from a seed file.
///
/// # Flow
///
/// 1. Read and validate the file
/// 2. Confirm replacing stored records (unless `--keep-existing` or `--yes`)
/// 3. Replace stored records with the file in one transaction, or upsert on
///    top of them with `--keep-existing`
/// 4. Print the resulting analysis
async fn seed(
    repo: Arc<PgCustomerRepository>,
    file: PathBuf,
    keep_existing: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🌱 Seed Customer Records".bright_blue().bold());
    println!();

    let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let request: BulkUploadRequest = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid customer file", file.display()))?;
    request
        .validate()
        .with_context(|| format!("{} contains invalid records", file.display()))?;

    let batch: Vec<NewCustomer> = request.customers.into_iter().map(Into::into).collect();
    println!(
        "  File:    {} ({} records)",
        file.display().to_string().cyan(),
        batch.len().to_string().bright_white().bold()
    );

    let service = CustomerService::new(repo.clone(), batch.len().max(1));

    if !keep_existing {
        let existing = service.count_customers().await?;

        if existing > 0 {
            println!(
                "  Stored:  {} records will be replaced",
                existing.to_string().yellow().bold()
            );
            println!();

            if !skip_confirm {
                let confirmed = Confirm::new()
                    .with_prompt("Replace stored records?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }
        }
    }

    let stored = if keep_existing {
        service.bulk_upload(batch).await
    } else {
        service.replace_customers(batch).await
    }
    .map_err(|e| anyhow::anyhow!("Failed to upload records: {}", e))?;

    println!();
    println!(
        "{}",
        format!("✅ Loaded {} customer records", stored.len())
            .green()
            .bold()
    );
    for source in SourceSystem::ALL {
        let count = stored.iter().filter(|c| c.source == source).count();
        println!(
            "  {:<12} {}",
            source.to_string().cyan(),
            count.to_string().bright_white()
        );
    }
    println!();

    analyze(repo).await
}

/// Prints the deduplication analysis.
///
/// # Output Format
///
/// ```text
/// 📊 Deduplication Analysis
///
///   Total records:    12
///   Unique customers: 8
///   Duplicates:       4
///   Customer ids:     101, 102, 103, 104, 105, 106, 107, 108
/// ```
async fn analyze(repo: Arc<PgCustomerRepository>) -> Result<()> {
    println!("{}", "📊 Deduplication Analysis".bright_blue().bold());
    println!();

    let report = ReconciliationService::new(repo)
        .analyze()
        .await
        .map_err(|e| anyhow::anyhow!("Analysis failed: {}", e))?;

    println!(
        "  Total records:    {}",
        report.total_records.to_string().bright_white().bold()
    );
    println!(
        "  Unique customers: {}",
        report.unique_customers.to_string().bright_green().bold()
    );
    println!(
        "  Duplicates:       {}",
        report.duplicates_found.to_string().bright_yellow().bold()
    );
    println!("  Customer ids:     {}", join_ids(&report.unique_customer_ids));
    println!();

    Ok(())
}

/// Prints the cross-source comparison, one row per source.
async fn compare(repo: Arc<PgCustomerRepository>) -> Result<()> {
    println!("{}", "🔍 Source Comparison".bright_blue().bold());
    println!();

    let report = ReconciliationService::new(repo)
        .compare()
        .await
        .map_err(|e| anyhow::anyhow!("Comparison failed: {}", e))?;

    println!(
        "  {:<12} {:<8} {}",
        "Source".bright_white().bold(),
        "Count".bright_white().bold(),
        "Only here".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for breakdown in &report.per_source {
        println!(
            "  {:<12} {:<8} {}",
            breakdown.source.to_string().cyan(),
            breakdown.count.to_string().bright_white(),
            join_ids(&breakdown.only_in)
        );
    }

    println!();
    println!("  In all sources:   {}", join_ids(&report.in_all_sources));
    println!("  Partially shared: {}", join_ids(&report.partially_shared));
    println!();

    Ok(())
}

/// Deletes all records after confirmation.
async fn clear(repo: Arc<PgCustomerRepository>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Clear Customer Records".bright_blue().bold());
    println!();

    let service = CustomerService::new(repo, 1);
    let existing = service.count_customers().await?;

    if existing == 0 {
        println!("{}", "  No records stored".yellow());
        return Ok(());
    }

    println!("  Stored: {}", existing.to_string().yellow().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all customer records?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .clear_customers()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to clear records: {}", e))?;

    println!();
    println!(
        "{}",
        format!("✅ Deleted {deleted} customer records").green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Records:    {}", records.to_string().bright_green().bold());
        }
    }

    Ok(())
}

fn join_ids(ids: &[i64]) -> String {
    if ids.is_empty() {
        return "-".bright_black().to_string();
    }

    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
