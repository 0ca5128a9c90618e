//! Frame source abstraction for sample ingestion.
//!
//! Provides a unified trait for reading wire frames from different stand-ins
//! for the wireless link: scripted sequences (tests/replay), stdin (JSON
//! lines from `walk-sim` or a recording), and the in-process synthetic
//! walker.

use anyhow::Result;
use async_trait::async_trait;

use super::synthetic::{WalkPattern, TICK_MS};
use super::WireFrame;

/// Events produced by a frame source.
pub enum FrameEvent {
    /// A valid wire frame was read.
    Frame(WireFrame),
    /// Source reached end of data (EOF for files/stdin, script exhausted).
    Eof,
}

/// Trait abstracting where wire frames come from.
///
/// Implementations handle format parsing and pacing internally. The
/// processing loop calls [`next_frame`](FrameSource::next_frame) in a
/// select! with cancellation.
#[async_trait]
pub trait FrameSource: Send + 'static {
    /// Read the next frame from the source.
    ///
    /// Returns `FrameEvent::Eof` when no more data is available.
    async fn next_frame(&mut self) -> Result<FrameEvent>;

    /// Human-readable name for logging (e.g. "scripted", "stdin").
    fn source_name(&self) -> &str;
}

// ============================================================================
// Scripted Source (tests / replay)
// ============================================================================

/// Replays a pre-built frame sequence with optional inter-frame delay.
pub struct ScriptedSource {
    frames: std::vec::IntoIter<WireFrame>,
    delay_ms: u64,
    yielded_first: bool,
}

impl ScriptedSource {
    pub fn new(frames: Vec<WireFrame>, delay_ms: u64) -> Self {
        Self {
            frames: frames.into_iter(),
            delay_ms,
            yielded_first: false,
        }
    }
}

#[async_trait]
impl FrameSource for ScriptedSource {
    async fn next_frame(&mut self) -> Result<FrameEvent> {
        // Delay between frames; skipped before the first so a script starts
        // immediately.
        if self.yielded_first && self.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
        }
        match self.frames.next() {
            Some(f) => {
                self.yielded_first = true;
                Ok(FrameEvent::Frame(f))
            }
            None => Ok(FrameEvent::Eof),
        }
    }

    fn source_name(&self) -> &str {
        "scripted"
    }
}

// ============================================================================
// Stdin Source (JSON frames, one per line)
// ============================================================================

/// Reads JSON-formatted wire frames from stdin.
///
/// Used with the simulator binary: `walk-sim | gaitsense --stdin`.
pub struct StdinSource {
    reader: tokio::io::BufReader<tokio::io::Stdin>,
    line_buffer: String,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            reader: tokio::io::BufReader::new(tokio::io::stdin()),
            line_buffer: String::with_capacity(256),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameSource for StdinSource {
    async fn next_frame(&mut self) -> Result<FrameEvent> {
        use tokio::io::AsyncBufReadExt;
        loop {
            self.line_buffer.clear();
            let bytes = self.reader.read_line(&mut self.line_buffer).await?;
            if bytes == 0 {
                return Ok(FrameEvent::Eof);
            }
            let line = self.line_buffer.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<WireFrame>(line) {
                Ok(frame) => return Ok(FrameEvent::Frame(frame)),
                Err(e) => {
                    tracing::warn!("[StdinSource] Failed to parse frame: {}", e);
                    // Skip malformed lines and keep reading
                }
            }
        }
    }

    fn source_name(&self) -> &str {
        "stdin"
    }
}

// ============================================================================
// Synthetic Source (in-process walker)
// ============================================================================

/// Generates walking frames in-process, paced like the real rig.
pub struct SyntheticSource {
    pattern: WalkPattern,
    pending: std::collections::VecDeque<WireFrame>,
    tick_interval: tokio::time::Duration,
    remaining_ticks: Option<u64>,
}

impl SyntheticSource {
    /// Create a synthetic walker.
    ///
    /// `speed` scales pacing (1.0 = realtime, 0 is treated as "no delay");
    /// `duration_secs` bounds the walk, `None` walks until cancelled.
    pub fn new(seed: u64, speed: f64, duration_secs: Option<u64>) -> Self {
        let tick_interval = if speed > 0.0 {
            tokio::time::Duration::from_secs_f64(TICK_MS as f64 / 1000.0 / speed)
        } else {
            tokio::time::Duration::ZERO
        };
        Self {
            pattern: WalkPattern::new(seed),
            pending: std::collections::VecDeque::new(),
            tick_interval,
            remaining_ticks: duration_secs.map(|secs| secs * 1000 / TICK_MS),
        }
    }
}

#[async_trait]
impl FrameSource for SyntheticSource {
    async fn next_frame(&mut self) -> Result<FrameEvent> {
        if self.pending.is_empty() {
            if let Some(ref mut remaining) = self.remaining_ticks {
                if *remaining == 0 {
                    return Ok(FrameEvent::Eof);
                }
                *remaining -= 1;
            }
            if !self.tick_interval.is_zero() {
                tokio::time::sleep(self.tick_interval).await;
            }
            self.pending.extend(self.pattern.tick_frames());
        }
        match self.pending.pop_front() {
            Some(f) => Ok(FrameEvent::Frame(f)),
            None => Ok(FrameEvent::Eof),
        }
    }

    fn source_name(&self) -> &str {
        "synthetic"
    }
}
