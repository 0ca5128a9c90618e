//! gaitsense - Real-Time Gait Metrics Engine
//!
//! Estimates gait metrics from streamed wearable-sensor frames.
//!
//! # Usage
//!
//! ```bash
//! # Run against the built-in synthetic walker
//! cargo run --release
//!
//! # Run with simulated frames piped over stdin
//! walk-sim --cycles 60 | gaitsense --stdin
//! ```
//!
//! # Environment Variables
//!
//! - `GAITSENSE_CONFIG`: Path to a TOML config with detector thresholds
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gaitsense::config;
use gaitsense::publish::TracingPublisher;
use gaitsense::transport::{StdinSource, SyntheticSource};
use gaitsense::{GaitConfig, ProcessingLoop};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "gaitsense")]
#[command(about = "Real-time gait metrics from a three-sensor wearable rig")]
#[command(version)]
struct CliArgs {
    /// Read wire frames from stdin (JSON format) instead of the synthetic
    /// walker. Use with the simulator: walk-sim | gaitsense --stdin
    #[arg(long)]
    stdin: bool,

    /// Speed multiplier for the synthetic walker (1 = realtime, 0 = no delay)
    #[arg(long, default_value = "1")]
    speed: f64,

    /// Seed for the synthetic walker
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Stop the synthetic walker after this many seconds of simulated walking
    #[arg(long)]
    duration_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    config::init(GaitConfig::load());

    info!("gaitsense starting");

    // Ctrl-C cancels the processing loop; the final metrics still print.
    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            signal_token.cancel();
        }
    });

    let pipeline = ProcessingLoop::new(TracingPublisher, cancel_token);

    let stats = if args.stdin {
        let mut source = StdinSource::new();
        pipeline.run(&mut source).await
    } else {
        info!("No --stdin given — walking the synthetic pattern");
        let mut source = SyntheticSource::new(args.seed, args.speed, args.duration_secs);
        pipeline.run(&mut source).await
    };

    info!(
        "Done: {} frames, {} passes, {} steps",
        stats.frames_processed, stats.passes_run, stats.final_snapshot.step_count
    );
    Ok(())
}
