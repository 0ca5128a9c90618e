//! Per-foot edge-triggered step detection.

use std::time::{Duration, Instant};

use crate::config;
use crate::types::{Foot, GaitState};

/// Edge-triggered step state machine.
///
/// A foot is "in ground contact triggering a step" when its FSR reading is
/// at or above the pressure threshold AND its yaw is below the step
/// threshold. A step is registered only when that condition holds, the
/// foot's contact flag is still clear, and the shared debounce window has
/// expired. The debounce clock is ONE timestamp for both feet — a step
/// accepted on either foot suppresses the other foot for the full window.
/// That coupling matches the deployed rig and is part of the detector's
/// contract, not an accident.
///
/// Out-of-range FSR/yaw values are accepted as-is; there is no clamping and
/// no error path.
#[derive(Debug, Clone)]
pub struct StepDetector {
    fsr_threshold: i32,
    yaw_threshold: f32,
    debounce: Duration,
}

impl StepDetector {
    /// Build from the global config.
    pub fn new() -> Self {
        Self::from_config(&config::get().detection)
    }

    pub fn from_config(cfg: &config::DetectionConfig) -> Self {
        Self {
            fsr_threshold: cfg.fsr_step_threshold,
            yaw_threshold: cfg.yaw_step_threshold,
            debounce: Duration::from_millis(cfg.step_debounce_ms),
        }
    }

    /// Feed the latest force/yaw readings for one foot.
    ///
    /// Returns `true` when a new step was registered. On registration the
    /// total and per-foot counters advance, the foot's step rate is
    /// recomputed against elapsed session time (skipped while elapsed is
    /// zero), and the shared debounce clock restarts. When the contact
    /// condition is false the foot's flag is cleared, re-arming the edge —
    /// nothing fires on the falling edge.
    pub fn observe(
        &self,
        state: &mut GaitState,
        foot: Foot,
        fsr: i32,
        yaw: f32,
        now: Instant,
    ) -> bool {
        let contact = fsr >= self.fsr_threshold && yaw < self.yaw_threshold;

        if !contact {
            match foot {
                Foot::Left => state.left_contact = false,
                Foot::Right => state.right_contact = false,
            }
            return false;
        }

        let already_counted = match foot {
            Foot::Left => state.left_contact,
            Foot::Right => state.right_contact,
        };
        if already_counted {
            return false;
        }

        let debounced = state
            .last_step
            .is_some_and(|last| now.saturating_duration_since(last) < self.debounce);
        if debounced {
            // Contact flag stays clear: the same contact can still register
            // once the window expires, exactly like the rig firmware.
            return false;
        }

        state.step_count += 1;
        let elapsed = state.elapsed_session(now).unwrap_or_default();
        match foot {
            Foot::Left => {
                state.left_contact = true;
                state.left_steps += 1;
                if !elapsed.is_zero() {
                    state.left_step_rate = state.left_steps as f32 / elapsed.as_secs_f32();
                }
            }
            Foot::Right => {
                state.right_contact = true;
                state.right_steps += 1;
                if !elapsed.is_zero() {
                    state.right_step_rate = state.right_steps as f32 / elapsed.as_secs_f32();
                }
            }
        }
        state.last_step = Some(now);
        true
    }
}
