//! CLI administration tool for link-shortener.
//!
//! Inspects and prunes stored links without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links, newest first
//! cargo run --bin admin -- links list
//!
//! # Delete a link by id or short code
//! cargo run --bin admin -- links delete aZ3kq9x
//!
//! # View totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*`).

use link_shortener::application::services::LinkService;
use link_shortener::config;
use link_shortener::domain::entities::{Link, LinkIdentifier};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use link_shortener::server::connect_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
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
    /// Manage short links
    Links {
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

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links
    List,

    /// Delete a link
    Delete {
        /// Link id or short code
        identifier: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repo.clone());

    let result = match cli.command {
        Commands::Links { action } => match action {
            LinkAction::List => list_links(&service).await,
            LinkAction::Delete { identifier, yes } => {
                delete_link(&service, repo.as_ref(), &identifier, yes).await
            }
        },
        Commands::Stats => show_stats(&service).await,
        Commands::Db {
            action: DbAction::Check,
        } => check_db(&service).await,
    };

    pool.close().await;
    result
}

/// Lists all links in a table.
///
/// # Output Format
///
/// ```text
/// Links
///
///   ID    Code         Clicks  Created           URL
///   ------------------------------------------------------------------
///   2     aZ3kq9x      14      2025-01-16 14:20  https://example.com/a/b/c
///   1     promo        0       2025-01-15 10:30  https://example.com/promo
/// ```
async fn list_links(service: &LinkService<PgLinkRepository>) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<12} {:<7} {:<17} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<5} {:<12} {:<7} {:<17} {}",
            link.id.to_string().bright_black(),
            link.short_code.cyan(),
            link.clicks,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.long_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link after showing it and asking for confirmation.
///
/// Lookup mirrors the HTTP API: an id-shaped identifier is tried as an id
/// first, then as a short code.
async fn delete_link(
    service: &LinkService<PgLinkRepository>,
    repo: &PgLinkRepository,
    identifier: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Delete Link".bright_blue().bold());
    println!();

    let Some(link) = find_link(repo, identifier).await? else {
        println!("{}", "  Link not found".yellow());
        return Ok(());
    };

    println!("  Code:   {}", link.short_code.cyan());
    println!("  URL:    {}", link.long_url);
    println!("  Clicks: {}", link.clicks);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(&link.id.to_string())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "Link deleted".green().bold());
    println!();

    Ok(())
}

async fn find_link(repo: &PgLinkRepository, identifier: &str) -> Result<Option<Link>> {
    if let LinkIdentifier::Id(id) = LinkIdentifier::parse(identifier)
        && let Some(link) = repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    {
        return Ok(Some(link));
    }

    repo.find_by_code(identifier)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))
}

/// Displays total links and total clicks.
async fn show_stats(service: &LinkService<PgLinkRepository>) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load links: {}", e))?;
    let total_clicks: i64 = links.iter().map(|l| l.clicks).sum();
    let never_clicked = links.iter().filter(|l| !l.was_clicked()).count();

    println!(
        "  Links:          {}",
        links.len().to_string().bright_white().bold()
    );
    println!(
        "  Clicks:         {}",
        total_clicks.to_string().bright_white().bold()
    );
    println!("  Never clicked:  {}", never_clicked);
    println!();

    Ok(())
}

/// Verifies the database answers queries.
async fn check_db(service: &LinkService<PgLinkRepository>) -> Result<()> {
    match service.ping().await {
        Ok(()) => {
            let count = service
                .count_links()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
            println!("{}", "Database connection OK".green().bold());
            println!("  Stored links: {}", count);
            Ok(())
        }
        Err(e) => {
            println!("{}", "Database check failed".red().bold());
            Err(anyhow::anyhow!("{}", e))
        }
    }
}
