//! Session state and the mutable gait aggregate.
//!
//! `GaitState` is the single owned aggregate behind every published metric.
//! It is mutated only by the ingestion pass and the session-control
//! handlers, on one task, which is what makes the zeroing operations atomic
//! from any observer's point of view.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::samples::{AccelerationSample, Foot, OrientationSample};

/// Whether gait computation is currently accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Initial state; ingestion passes decode samples but update no metrics.
    #[default]
    Stopped,
    /// Metrics accumulate on every qualifying ingestion pass.
    Running,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Stopped => write!(f, "Stopped"),
            SessionPhase::Running => write!(f, "Running"),
        }
    }
}

/// The one mutable aggregate owned by the gait core.
///
/// Created once at startup with everything zeroed and `Stopped`; never
/// reallocated. Session commands zero it in place.
#[derive(Debug, Clone, Default)]
pub struct GaitState {
    /// Session gate for all metric updates.
    pub phase: SessionPhase,
    /// When the current session was started; `None` until the first start.
    pub session_start: Option<Instant>,

    // === Step accumulators ===
    /// Total steps across both feet.
    pub step_count: u32,
    pub left_steps: u32,
    pub right_steps: u32,
    /// Per-foot step rate (steps/sec), updated on each accepted step.
    pub left_step_rate: f32,
    pub right_step_rate: f32,

    // === Derived metrics ===
    pub left_step_length: f32,
    pub right_step_length: f32,
    /// Always `left_step_length + right_step_length` after a recompute.
    pub stride_length: f32,
    /// Leaky-integrated walking speed (m/s); never negative.
    pub walking_speed: f32,
    /// Steps per minute derived from speed and stride length.
    pub cadence: f32,

    // === Step-detector state ===
    /// Timestamp of the last accepted step. Shared across both feet: a step
    /// on either foot re-arms the debounce window for both.
    pub last_step: Option<Instant>,
    /// Per-foot "contact already counted" flags; cleared when the foot's
    /// contact condition drops, re-arming the edge trigger.
    pub left_contact: bool,
    pub right_contact: bool,

    // === Retained raw readings (stale-data-by-default) ===
    /// Most recent orientation decoded on any ingestion pass.
    pub orientation: OrientationSample,
    pub left_fsr: i32,
    pub right_fsr: i32,
    /// Most recent hip accelerometer reading.
    pub hip_accel: AccelerationSample,

    /// When the velocity estimator last ran; used by the measured-interval
    /// integration mode.
    pub last_velocity_tick: Option<Instant>,
}

impl GaitState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Time since the session started, or `None` when no start was recorded.
    pub fn elapsed_session(&self, now: Instant) -> Option<Duration> {
        self.session_start
            .map(|start| now.saturating_duration_since(start))
    }

    /// Latest retained FSR reading for a foot.
    pub fn fsr(&self, foot: Foot) -> i32 {
        match foot {
            Foot::Left => self.left_fsr,
            Foot::Right => self.right_fsr,
        }
    }

    /// Steps counted on a single foot.
    pub fn foot_steps(&self, foot: Foot) -> u32 {
        match foot {
            Foot::Left => self.left_steps,
            Foot::Right => self.right_steps,
        }
    }

    /// Point-in-time copy of every published metric.
    pub fn snapshot(&self) -> GaitSnapshot {
        GaitSnapshot {
            phase: self.phase,
            step_count: self.step_count,
            walking_speed: self.walking_speed,
            left_step_length: self.left_step_length,
            right_step_length: self.right_step_length,
            stride_length: self.stride_length,
            cadence: self.cadence,
            captured_at: chrono::Utc::now(),
        }
    }
}

/// Serializable view of the published gait metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaitSnapshot {
    pub phase: SessionPhase,
    pub step_count: u32,
    pub walking_speed: f32,
    pub left_step_length: f32,
    pub right_step_length: f32,
    pub stride_length: f32,
    pub cadence: f32,
    pub captured_at: chrono::DateTime<chrono::Utc>,
}

impl Default for GaitSnapshot {
    fn default() -> Self {
        GaitState::default().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_zeroed_and_stopped() {
        let state = GaitState::new();
        assert_eq!(state.phase, SessionPhase::Stopped);
        assert_eq!(state.step_count, 0);
        assert_eq!(state.walking_speed, 0.0);
        assert!(state.session_start.is_none());
        assert!(state.last_step.is_none());
        assert!(!state.left_contact && !state.right_contact);
    }

    #[test]
    fn elapsed_session_saturates_instead_of_panicking() {
        let mut state = GaitState::new();
        let now = Instant::now();
        state.session_start = Some(now + Duration::from_secs(5));
        assert_eq!(state.elapsed_session(now), Some(Duration::ZERO));
    }

    #[test]
    fn snapshot_copies_published_metrics() {
        let mut state = GaitState::new();
        state.step_count = 7;
        state.walking_speed = 1.25;
        state.stride_length = 1.4;
        let snap = state.snapshot();
        assert_eq!(snap.step_count, 7);
        assert_eq!(snap.walking_speed, 1.25);
        assert_eq!(snap.stride_length, 1.4);
    }
}
