use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use txreview_core::{ClientConfig, TransactionService};
use txreview_view::{Locale, TransactionList};

/// Show the transactions awaiting review.
#[derive(Debug, Parser)]
#[command(name = "txreview", version, about)]
struct Args {
    /// Base address of the transaction API. Falls back to `TXREVIEW_API_URL`,
    /// then to http://localhost:8080/api.
    #[arg(long)]
    base_url: Option<String>,

    /// Language for labels and dates.
    #[arg(long, value_enum, default_value_t = Locale::En)]
    locale: Locale,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.base_url.map(ClientConfig::new).unwrap_or_else(ClientConfig::from_env);
    let service = TransactionService::from_config(&config);

    let mut list = TransactionList::new(Arc::new(service), args.locale);
    list.mount();
    eprintln!("{}", list.render());
    list.settle().await;
    println!("{}", list.render());
    Ok(())
}
