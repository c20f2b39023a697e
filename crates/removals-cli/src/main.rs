mod booking;
mod payment;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "removals-cli")]
#[command(about = "Removals booking wizard command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price a booking draft and show the journey
    Price {
        /// YAML booking draft
        draft: PathBuf,
    },
    /// Create a quotation from a booking draft
    Quote {
        /// YAML booking draft
        draft: PathBuf,
    },
    /// Book a draft directly, without payment
    Book {
        /// YAML booking draft
        draft: PathBuf,
    },
    /// Open a payment checkout session for a draft
    Checkout {
        /// YAML booking draft
        draft: PathBuf,
    },
    /// Finish a booking after the payment redirect
    Reconcile {
        /// Return URL carrying the `session_id` query parameter
        return_url: String,
        /// Draft used as fallback for values missing from the session
        #[arg(long)]
        draft: Option<PathBuf>,
    },
    /// Look up a stored quotation
    QuoteStatus {
        /// Quotation reference
        quote_ref: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = removals_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let client = Arc::new(removals_api::RemovalsClient::from_config(&config)?);

    match cli.command {
        Commands::Price { draft } => booking::run_price(client, &config, &draft).await,
        Commands::Quote { draft } => booking::run_quote(client, &config, &draft).await,
        Commands::Book { draft } => booking::run_book(client, &config, &draft).await,
        Commands::Checkout { draft } => booking::run_checkout(client, &config, &draft).await,
        Commands::Reconcile { return_url, draft } => {
            payment::run_reconcile(client, &return_url, draft.as_deref()).await
        }
        Commands::QuoteStatus { quote_ref } => payment::run_quote_status(&client, &quote_ref).await,
    }
}

#[cfg(test)]
mod tests;
