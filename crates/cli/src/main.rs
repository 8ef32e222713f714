//! Plumcot CLI - shopper and admin tooling for the shop backend.
//!
//! # Usage
//!
//! ```bash
//! # Resolve (or provision) the remembered shopper and show it
//! plumcot identity show
//!
//! # Forget the remembered shopper
//! plumcot identity reset
//!
//! # Browse the catalog
//! plumcot products list --search tea --page 1
//!
//! # Probe the admin API (credentials from PLUMCOT_ADMIN_USER/PASSWORD)
//! plumcot admin status
//! plumcot admin stats
//! ```
//!
//! Configuration comes from the environment (see `plumcot-client`):
//! `PLUMCOT_API_URL` is required, `PLUMCOT_PROFILE_PATH` optional.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "plumcot")]
#[command(author, version, about = "Plumcot Market client tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or reset the remembered shopper identity
    Identity {
        #[command(subcommand)]
        action: IdentityAction,
    },
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Authenticated probes against the admin API
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum IdentityAction {
    /// Resolve the current shopper, provisioning a guest if needed
    Show,
    /// Forget the remembered shopper; the next run provisions afresh
    Reset,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List catalog products
    List {
        /// Free-text search filter
        #[arg(short, long)]
        search: Option<String>,

        /// Category filter
        #[arg(short, long)]
        category: Option<String>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: i64,

        /// Page size
        #[arg(long, default_value_t = 10)]
        page_size: i64,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Check that the admin API accepts the configured credential
    Status,
    /// Print store-wide counters
    Stats,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Identity { action } => match action {
            IdentityAction::Show => commands::identity::show().await?,
            IdentityAction::Reset => commands::identity::reset().await?,
        },
        Commands::Products { action } => match action {
            ProductsAction::List {
                search,
                category,
                page,
                page_size,
            } => {
                commands::products::list(search.as_deref(), category.as_deref(), page, page_size)
                    .await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Status => commands::admin::status().await?,
            AdminAction::Stats => commands::admin::stats().await?,
        },
    }
    Ok(())
}
