use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use macroquad::prelude::{get_frame_time, next_frame};
use macroquad::window::Conf;
use manor_app::app_loop::AppSession;
use manor_app::audio::TracingAudioSink;
use manor_app::{frame_input, load_collection, render, seed, window_config};
use manor_core::Game;
use manor_core::collection;
use manor_gateway::GatewayDriver;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Explore an API collection as a haunted manor", long_about = None)]
struct Args {
    /// Collection JSON file (native or Postman v2.1). The built-in sample
    /// collection is used when omitted.
    #[arg(short, long)]
    collection: Option<PathBuf>,
    /// Fixed seed for reproducible monster jitter and power-up rolls
    #[arg(long)]
    seed: Option<u64>,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

fn window_conf() -> Conf {
    window_config::build_window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let collection = match &args.collection {
        Some(path) => load_collection(path)?,
        None => collection::sample_collection(),
    };
    let run_seed = args.seed.unwrap_or_else(seed::generate_runtime_seed);
    info!(
        seed = run_seed,
        collection = %collection.name,
        endpoints = collection.endpoints.len(),
        "starting run"
    );

    let game = Game::new(&collection, run_seed).context("collection cannot seed a mansion")?;
    let driver = GatewayDriver::new(&collection, Duration::from_secs(args.timeout_secs))
        .context("failed to start the request gateway")?;
    let mut session = AppSession::new(game, driver, Box::new(TracingAudioSink));

    loop {
        let input = frame_input::capture_frame_input();
        if input.quit {
            break;
        }
        session.frame(get_frame_time(), &input);
        render::draw_frame(session.game.state());
        next_frame().await;
    }
    Ok(())
}
