//! Leaky-integrator walking speed estimation.

use std::time::Instant;

use crate::config::{self, IntegrationMode};
use crate::types::GaitState;

/// Walking-speed estimator over hip acceleration magnitude.
///
/// While the magnitude exceeds the motion gate the speed integrates
/// (`speed += magnitude * dt`); otherwise it decays exponentially toward
/// zero. The result is clamped at zero, so the estimate can never go
/// negative regardless of the input sequence.
///
/// In the default `fixed-step` mode `dt` is a constant 0.01 s per update,
/// deliberately decoupled from the real inter-sample interval — the speed
/// trajectory then depends on the update *count*, matching the deployed rig.
/// The `measured` mode substitutes the true elapsed time between updates and
/// produces a different trajectory; it is opt-in via config.
#[derive(Debug, Clone)]
pub struct VelocityEstimator {
    motion_gate: f32,
    fixed_step: f32,
    decay: f32,
    mode: IntegrationMode,
}

impl VelocityEstimator {
    /// Build from the global config.
    pub fn new() -> Self {
        Self::from_config(&config::get().velocity)
    }

    pub fn from_config(cfg: &config::VelocityConfig) -> Self {
        Self {
            motion_gate: cfg.motion_gate_g,
            fixed_step: cfg.integration_step_s,
            decay: cfg.decay_rate,
            mode: cfg.integration,
        }
    }

    /// Run one update against the latest retained hip acceleration.
    pub fn update(&self, state: &mut GaitState, now: Instant) {
        let magnitude = state.hip_accel.magnitude();
        let dt = match self.mode {
            IntegrationMode::FixedStep => self.fixed_step,
            IntegrationMode::Measured => state
                .last_velocity_tick
                .map_or(self.fixed_step, |last| {
                    now.saturating_duration_since(last).as_secs_f32()
                }),
        };

        if magnitude > self.motion_gate {
            state.walking_speed += magnitude * dt;
        } else {
            state.walking_speed *= self.decay;
        }
        state.walking_speed = state.walking_speed.max(0.0);
        state.last_velocity_tick = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_relative_eq;

    use super::*;
    use crate::config::VelocityConfig;
    use crate::types::AccelerationSample;

    fn estimator() -> VelocityEstimator {
        VelocityEstimator::from_config(&VelocityConfig::default())
    }

    #[test]
    fn integrates_fixed_step_above_gate() {
        let est = estimator();
        let mut state = GaitState::new();
        state.hip_accel = AccelerationSample { x: 0.0, y: 0.0, z: 1.5 };

        let t0 = Instant::now();
        for i in 0..100 {
            est.update(&mut state, t0 + Duration::from_millis(i));
        }
        // 100 updates of 1.5 g * 0.01 s, independent of the 1 ms spacing.
        assert_relative_eq!(state.walking_speed, 1.5, epsilon = 1e-4);
    }

    #[test]
    fn decays_below_gate() {
        let est = estimator();
        let mut state = GaitState::new();
        state.walking_speed = 2.0;
        state.hip_accel = AccelerationSample { x: 0.0, y: 0.0, z: 0.5 };

        let t0 = Instant::now();
        for i in 0..10 {
            est.update(&mut state, t0 + Duration::from_millis(i * 10));
        }
        assert_relative_eq!(state.walking_speed, 2.0 * 0.995_f32.powi(10), epsilon = 1e-5);
    }

    #[test]
    fn gate_boundary_decays() {
        // Magnitude exactly equal to the gate is not motion: the comparison
        // is strictly greater. 3-4-0 gives an exact magnitude of 5.
        let cfg = VelocityConfig {
            motion_gate_g: 5.0,
            ..VelocityConfig::default()
        };
        let est = VelocityEstimator::from_config(&cfg);
        let mut state = GaitState::new();
        state.walking_speed = 1.0;
        state.hip_accel = AccelerationSample { x: 3.0, y: 4.0, z: 0.0 };
        est.update(&mut state, Instant::now());
        assert_relative_eq!(state.walking_speed, 0.995);
    }

    #[test]
    fn never_goes_negative() {
        let est = estimator();
        let mut state = GaitState::new();
        state.hip_accel = AccelerationSample::default();
        let t0 = Instant::now();
        for i in 0..1000 {
            est.update(&mut state, t0 + Duration::from_millis(i));
            assert!(state.walking_speed >= 0.0);
        }
        assert_eq!(state.walking_speed, 0.0);
    }

    #[test]
    fn measured_mode_uses_real_interval() {
        let cfg = VelocityConfig {
            integration: crate::config::IntegrationMode::Measured,
            ..VelocityConfig::default()
        };
        let est = VelocityEstimator::from_config(&cfg);
        let mut state = GaitState::new();
        state.hip_accel = AccelerationSample { x: 0.0, y: 0.0, z: 2.0 };

        let t0 = Instant::now();
        // First update has no previous tick: falls back to the fixed step.
        est.update(&mut state, t0);
        assert_relative_eq!(state.walking_speed, 2.0 * 0.01, epsilon = 1e-6);

        // Second update integrates the real 250 ms gap.
        est.update(&mut state, t0 + Duration::from_millis(250));
        assert_relative_eq!(state.walking_speed, 2.0 * 0.01 + 2.0 * 0.25, epsilon = 1e-5);
    }
}
