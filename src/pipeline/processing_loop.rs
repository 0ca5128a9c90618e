//! Unified frame processing loop shared across all input modes.
//!
//! One loop serves stdin replay, the synthetic walker and scripted test
//! runs: frame -> latch -> ingestion pass -> publish, with session control
//! frames handled between passes.

use std::time::Instant;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::defaults::PROGRESS_LOG_INTERVAL;
use crate::gait::{session, SensorIngest};
use crate::publish::MetricsPublisher;
use crate::transport::{FrameEvent, FrameSource, PeripheralCache, WireFrame};
use crate::types::{GaitSnapshot, GaitState};

/// Counters reported when the loop exits.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Frames accepted from the source (including control frames).
    pub frames_processed: u64,
    /// Ingestion passes that actually ran (fresh orientation present).
    pub passes_run: u64,
    /// Control frames handled.
    pub control_frames: u64,
    /// Frames rejected at the transport boundary.
    pub frames_rejected: u64,
    /// Final metric snapshot at loop exit.
    pub final_snapshot: GaitSnapshot,
}

/// Owns all state needed for the frame processing loop.
///
/// Built with [`new()`](ProcessingLoop::new), then consumed by
/// [`run()`](ProcessingLoop::run).
pub struct ProcessingLoop<P: MetricsPublisher> {
    state: GaitState,
    cache: PeripheralCache,
    ingest: SensorIngest,
    publisher: P,
    cancel_token: CancellationToken,
    snapshot_tx: watch::Sender<GaitSnapshot>,
}

impl<P: MetricsPublisher> ProcessingLoop<P> {
    pub fn new(publisher: P, cancel_token: CancellationToken) -> Self {
        let state = GaitState::new();
        let (snapshot_tx, _) = watch::channel(state.snapshot());
        Self {
            state,
            cache: PeripheralCache::new(),
            ingest: SensorIngest::new(),
            publisher,
            cancel_token,
            snapshot_tx,
        }
    }

    /// Subscribe to coalesced metric snapshots, one per completed pass.
    ///
    /// Observers read the latest value without ever touching `GaitState`.
    pub fn snapshots(&self) -> watch::Receiver<GaitSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Run the processing loop until the source is exhausted or cancellation.
    ///
    /// Returns final pipeline statistics.
    pub async fn run<S: FrameSource>(mut self, source: &mut S) -> PipelineStats {
        let mut frames_processed = 0u64;
        let mut passes_run = 0u64;
        let mut control_frames = 0u64;
        let mut frames_rejected = 0u64;

        info!("Processing sensor frames from {}...", source.source_name());

        loop {
            let event = tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!("[FrameProcessor] Shutdown signal received");
                    break;
                }
                result = source.next_frame() => {
                    match result {
                        Ok(ev) => ev,
                        Err(e) => {
                            warn!("[FrameProcessor] Source error: {}", e);
                            break;
                        }
                    }
                }
            };

            let frame = match event {
                FrameEvent::Frame(f) => f,
                FrameEvent::Eof => {
                    info!(
                        "[FrameProcessor] Source reached end ({} frames processed)",
                        frames_processed
                    );
                    break;
                }
            };

            frames_processed += 1;
            let now = Instant::now();

            match frame {
                WireFrame::Start { value } => {
                    control_frames += 1;
                    session::handle_start(&mut self.state, value, now);
                    self.snapshot_tx.send_replace(self.state.snapshot());
                }
                WireFrame::Reset { value } => {
                    control_frames += 1;
                    session::handle_reset(&mut self.state, value);
                    self.snapshot_tx.send_replace(self.state.snapshot());
                }
                ref sample => match sample.latch_into(&mut self.cache) {
                    Ok(Some(index)) => {
                        let ran = self.ingest.on_update(
                            &mut self.state,
                            &mut self.cache,
                            &mut self.publisher,
                            index,
                            now,
                        );
                        if ran {
                            passes_run += 1;
                            self.snapshot_tx.send_replace(self.state.snapshot());
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        frames_rejected += 1;
                        warn!("[FrameProcessor] Rejected frame: {}", e);
                    }
                },
            }

            if frames_processed % PROGRESS_LOG_INTERVAL == 0 {
                let snap = self.state.snapshot();
                info!(
                    "Progress: {} frames | {} passes | steps: {} | speed: {:.2} m/s | cadence: {:.1}",
                    frames_processed, passes_run, snap.step_count, snap.walking_speed, snap.cadence
                );
            }
        }

        let final_snapshot = self.state.snapshot();
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!("FINAL GAIT METRICS");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!("   Frames Processed:   {}", frames_processed);
        info!("   Ingestion Passes:   {}", passes_run);
        info!("   Control Frames:     {}", control_frames);
        info!("   Rejected Frames:    {}", frames_rejected);
        info!("   Steps:              {}", final_snapshot.step_count);
        info!("   Walking Speed:      {:.3} m/s", final_snapshot.walking_speed);
        info!("   Stride Length:      {:.3} m", final_snapshot.stride_length);
        info!("   Cadence:            {:.1} steps/min", final_snapshot.cadence);
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        PipelineStats {
            frames_processed,
            passes_run,
            control_frames,
            frames_rejected,
            final_snapshot,
        }
    }
}
