//! walk-sim - synthetic rig frame generator
//!
//! Emits the JSON frame stream a walking three-peripheral rig would notify,
//! one frame per line on stdout, paced in real time (scalable with
//! `--speed`). Pipe it into the engine:
//!
//! ```bash
//! walk-sim --cycles 30 | gaitsense --stdin
//! ```

use anyhow::Result;
use clap::Parser;

use gaitsense::transport::synthetic::{WalkPattern, CYCLE_TICKS, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "walk-sim")]
#[command(about = "Synthetic walking-frame generator for the gaitsense engine")]
#[command(version)]
struct CliArgs {
    /// Number of full gait cycles to emit (one cycle = one step per foot)
    #[arg(long, default_value = "30")]
    cycles: u64,

    /// Speed multiplier (1 = realtime pacing, 0 = emit as fast as possible)
    #[arg(long, default_value = "1")]
    speed: f64,

    /// RNG seed; the same seed reproduces the same stream
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let mut pattern = WalkPattern::new(args.seed);
    let tick_interval = if args.speed > 0.0 {
        Some(tokio::time::Duration::from_secs_f64(
            TICK_MS as f64 / 1000.0 / args.speed,
        ))
    } else {
        None
    };

    for _ in 0..args.cycles * CYCLE_TICKS {
        for frame in pattern.tick_frames() {
            println!("{}", serde_json::to_string(&frame)?);
        }
        if let Some(interval) = tick_interval {
            tokio::time::sleep(interval).await;
        }
    }

    Ok(())
}
