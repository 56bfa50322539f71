//! Prints the dashboard snapshot an account would see.
//!
//! ```sh
//! snapshot sarah.johnson@example.com
//! ```

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use swimdash::config::{Config, DEFAULT_LOG_FILTER};
use swimdash::dashboard::resolve;
use swimdash::db::PgStore;

#[derive(Parser)]
#[command(name = "snapshot", about = "Print the dashboard snapshot for an account")]
struct Args {
    /// The account's email address
    email: String,
    /// Print the JSON on a single line
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let store = PgStore::connect(&config).await?;

    let (body, code) = match resolve(&store, &args.email).await {
        Ok(snapshot) => (serde_json::to_value(&snapshot)?, ExitCode::SUCCESS),
        Err(error) => (error.body(), ExitCode::FAILURE),
    };
    println!("{}", render(&body, args.compact)?);

    Ok(code)
}

fn render(body: &Value, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(body)
    } else {
        serde_json::to_string_pretty(body)
    }
}
