use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use manor_core::collection::parse_collection;
use manor_core::gateway::{RequestOutcome, classify_error};
use manor_gateway::Gateway;

/// Headless smoke run: every endpoint once, no mansion required.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the collection JSON file (native or Postman v2.1)
    #[arg(short, long)]
    collection: PathBuf,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let raw = fs::read_to_string(&args.collection).with_context(|| {
        format!("failed to read collection file: {}", args.collection.display())
    })?;
    let collection = parse_collection(&raw).with_context(|| {
        format!("failed to parse collection file: {}", args.collection.display())
    })?;
    let gateway = Gateway::new(Duration::from_secs(args.timeout_secs))?;

    println!("{}: {} endpoints", collection.name, collection.endpoints.len());
    let mut failures = 0usize;
    for endpoint in &collection.endpoints {
        let outcome = gateway
            .execute(endpoint, collection.auth.as_ref(), collection.variables.as_ref())
            .await;
        match outcome {
            RequestOutcome::Success(response) => {
                println!(
                    "  {} {} -> {} {} in {}ms",
                    endpoint.method.as_str(),
                    endpoint.url,
                    response.status,
                    response.status_text,
                    response.duration_ms
                );
            }
            RequestOutcome::Failure(error) => {
                failures += 1;
                println!(
                    "  {} {} -> {} (would spawn a {:?})",
                    endpoint.method.as_str(),
                    endpoint.url,
                    error.message,
                    classify_error(error.error_code())
                );
            }
        }
    }
    println!("{failures} of {} endpoints would haunt their rooms", collection.endpoints.len());
    Ok(())
}
