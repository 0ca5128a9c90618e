//! System-wide default constants.
//!
//! Centralises the tuning values of the gait algorithms so each one is
//! written down once, with units, instead of being scattered across the
//! detectors.

// ============================================================================
// Step Detection
// ============================================================================

/// Minimum plantar-pressure reading (raw FSR analog units) for a foot to
/// count as being in ground contact.
pub const FSR_STEP_THRESHOLD: i32 = 200;

/// Yaw angle (device-native degrees) below which a ground contact is treated
/// as a gait-phase step candidate.
pub const YAW_STEP_THRESHOLD: f32 = 120.0;

/// Minimum time between accepted step events (ms).
///
/// The debounce clock is shared across both feet — see
/// [`StepDetector`](crate::gait::StepDetector) for the coupling this implies.
pub const STEP_DEBOUNCE_MS: u64 = 700;

// ============================================================================
// Velocity Estimation
// ============================================================================

/// Hip acceleration magnitude (g) above which the wearer counts as moving.
/// 1.10 covers gravity plus a small movement margin.
pub const MOTION_GATE_G: f32 = 1.10;

/// Fixed integration step (seconds) for the walking-speed leaky integrator.
///
/// Deliberately decoupled from the real inter-sample interval; see the
/// `integration` mode on [`VelocityConfig`](super::VelocityConfig).
pub const INTEGRATION_STEP_S: f32 = 0.01;

/// Exponential decay applied to walking speed on every below-gate update.
pub const SPEED_DECAY_RATE: f32 = 0.995;

// ============================================================================
// Runtime Shell
// ============================================================================

/// Frames between progress log lines in the processing loop.
pub const PROGRESS_LOG_INTERVAL: u64 = 256;
