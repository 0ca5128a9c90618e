//! Orientation-gated ingestion dispatch.

use std::time::Instant;

use tracing::debug;

use crate::publish::MetricsPublisher;
use crate::transport::SensorHub;
use crate::types::{GaitState, PeripheralIndex};

use super::{deriver, StepDetector, VelocityEstimator};

/// Dispatches one sample batch for a peripheral to the gait components.
///
/// A pass is driven by the *orientation* channel: it runs only when the
/// triggering peripheral has a fresh orientation value. Force (for the
/// triggering foot) and hip acceleration are secondary best-effort reads
/// gated on their own freshness — hip acceleration is drained on every pass
/// no matter which peripheral triggered it, so a foot-triggered pass can
/// consume a hip sample that arrived in between.
///
/// Peripheral indices are an unchecked precondition here: the transport
/// boundary has already validated them against the fixed roster.
#[derive(Debug, Clone)]
pub struct SensorIngest {
    detector: StepDetector,
    velocity: VelocityEstimator,
}

impl SensorIngest {
    /// Build from the global config.
    pub fn new() -> Self {
        Self {
            detector: StepDetector::new(),
            velocity: VelocityEstimator::new(),
        }
    }

    pub fn with_components(detector: StepDetector, velocity: VelocityEstimator) -> Self {
        Self { detector, velocity }
    }

    /// Run one ingestion pass for `index`.
    ///
    /// Returns `true` when the pass ran (a fresh orientation was present).
    /// While the session is Running the pass feeds the step detector (foot
    /// triggers only), then the velocity estimator, then the metric
    /// derivation, and publishes the results.
    pub fn on_update<H, P>(
        &self,
        state: &mut GaitState,
        hub: &mut H,
        publisher: &mut P,
        index: PeripheralIndex,
        now: Instant,
    ) -> bool
    where
        H: SensorHub,
        P: MetricsPublisher,
    {
        // The whole pass is gated on the trigger channel; a stale
        // orientation means no pass, regardless of other fresh kinds.
        let Some(orientation) = hub.read_orientation(index) else {
            return false;
        };
        state.orientation = orientation;

        if let Some(foot) = index.foot() {
            if let Some(force) = hub.read_force(index) {
                match foot {
                    crate::types::Foot::Left => state.left_fsr = force.fsr,
                    crate::types::Foot::Right => state.right_fsr = force.fsr,
                }
            }
        }

        if let Some(accel) = hub.read_accel(PeripheralIndex::Hip) {
            state.hip_accel = accel;
        }

        debug!(
            peripheral = %index,
            roll = state.orientation.roll,
            pitch = state.orientation.pitch,
            yaw = state.orientation.yaw,
            left_fsr = state.left_fsr,
            right_fsr = state.right_fsr,
            accel_x = state.hip_accel.x,
            accel_y = state.hip_accel.y,
            accel_z = state.hip_accel.z,
            "sample batch decoded"
        );

        if !state.is_running() {
            return true;
        }

        if let Some(foot) = index.foot() {
            let fsr = state.fsr(foot);
            let yaw = state.orientation.yaw;
            if self.detector.observe(state, foot, fsr, yaw, now) {
                publisher.publish_step_count(state.step_count);
            }
        }

        self.velocity.update(state, now);
        publisher.publish_walking_speed(state.walking_speed);

        deriver::recompute(state);
        publisher.publish_left_step_length(state.left_step_length);
        publisher.publish_right_step_length(state.right_step_length);
        publisher.publish_stride_length(state.stride_length);
        publisher.publish_cadence(state.cadence);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{write_i32_le, write_vec3_le};
    use crate::config::{DetectionConfig, VelocityConfig};
    use crate::transport::PeripheralCache;
    use crate::types::SessionPhase;

    /// Publisher that counts calls, for asserting the per-pass publish set.
    #[derive(Debug, Default)]
    struct CountingPublisher {
        step_counts: Vec<u32>,
        float_publishes: u32,
    }

    impl MetricsPublisher for CountingPublisher {
        fn publish_step_count(&mut self, steps: u32) {
            self.step_counts.push(steps);
        }
        fn publish_walking_speed(&mut self, _: f32) {
            self.float_publishes += 1;
        }
        fn publish_left_step_length(&mut self, _: f32) {
            self.float_publishes += 1;
        }
        fn publish_right_step_length(&mut self, _: f32) {
            self.float_publishes += 1;
        }
        fn publish_stride_length(&mut self, _: f32) {
            self.float_publishes += 1;
        }
        fn publish_cadence(&mut self, _: f32) {
            self.float_publishes += 1;
        }
    }

    fn ingest() -> SensorIngest {
        SensorIngest::with_components(
            StepDetector::from_config(&DetectionConfig::default()),
            VelocityEstimator::from_config(&VelocityConfig::default()),
        )
    }

    fn running_state() -> GaitState {
        let mut state = GaitState::new();
        state.phase = SessionPhase::Running;
        state.session_start = Some(Instant::now());
        state
    }

    #[test]
    fn pass_is_gated_on_orientation_freshness() {
        let ingest = ingest();
        let mut state = running_state();
        let mut cache = PeripheralCache::new();
        let mut publisher = CountingPublisher::default();

        // Fresh force but stale orientation: no pass at all.
        cache.latch_force(PeripheralIndex::LeftFoot, write_i32_le(250));
        let ran = ingest.on_update(
            &mut state,
            &mut cache,
            &mut publisher,
            PeripheralIndex::LeftFoot,
            Instant::now(),
        );
        assert!(!ran);
        assert_eq!(state.left_fsr, 0, "force must not be read without the trigger");
        assert_eq!(publisher.float_publishes, 0);

        // Orientation arrives: the same force sample is consumed.
        cache.latch_orientation(PeripheralIndex::LeftFoot, write_vec3_le([0.0, 0.0, 50.0]));
        let ran = ingest.on_update(
            &mut state,
            &mut cache,
            &mut publisher,
            PeripheralIndex::LeftFoot,
            Instant::now(),
        );
        assert!(ran);
        assert_eq!(state.left_fsr, 250);
    }

    #[test]
    fn hip_accel_is_drained_on_foot_triggered_passes() {
        let ingest = ingest();
        let mut state = running_state();
        let mut cache = PeripheralCache::new();
        let mut publisher = CountingPublisher::default();

        cache.latch_orientation(PeripheralIndex::RightFoot, write_vec3_le([0.0, 0.0, 140.0]));
        cache.latch_accel(PeripheralIndex::Hip, write_vec3_le([0.0, 0.0, 1.5]));

        assert!(ingest.on_update(
            &mut state,
            &mut cache,
            &mut publisher,
            PeripheralIndex::RightFoot,
            Instant::now(),
        ));
        assert_eq!(state.hip_accel.z, 1.5);
        assert!(!cache.has_accel_update(PeripheralIndex::Hip));
    }

    #[test]
    fn hip_triggered_pass_never_reads_force() {
        let ingest = ingest();
        let mut state = running_state();
        let mut cache = PeripheralCache::new();
        let mut publisher = CountingPublisher::default();

        cache.latch_orientation(PeripheralIndex::Hip, write_vec3_le([0.0, 0.0, 10.0]));
        cache.latch_force(PeripheralIndex::LeftFoot, write_i32_le(250));

        assert!(ingest.on_update(
            &mut state,
            &mut cache,
            &mut publisher,
            PeripheralIndex::Hip,
            Instant::now(),
        ));
        // The foot's force stays latched for its own future pass.
        assert_eq!(state.left_fsr, 0);
        assert!(cache.has_force_update(PeripheralIndex::LeftFoot));
    }

    #[test]
    fn stopped_session_decodes_but_publishes_nothing() {
        let ingest = ingest();
        let mut state = GaitState::new();
        let mut cache = PeripheralCache::new();
        let mut publisher = CountingPublisher::default();

        cache.latch_orientation(PeripheralIndex::LeftFoot, write_vec3_le([1.0, 2.0, 50.0]));
        cache.latch_force(PeripheralIndex::LeftFoot, write_i32_le(250));

        assert!(ingest.on_update(
            &mut state,
            &mut cache,
            &mut publisher,
            PeripheralIndex::LeftFoot,
            Instant::now(),
        ));
        // Readings are retained even while Stopped...
        assert_eq!(state.orientation.yaw, 50.0);
        assert_eq!(state.left_fsr, 250);
        // ...but no metric moves and nothing is published.
        assert_eq!(state.step_count, 0);
        assert_eq!(publisher.float_publishes, 0);
        assert!(publisher.step_counts.is_empty());
    }

    #[test]
    fn running_pass_publishes_the_full_float_set() {
        let ingest = ingest();
        let mut state = running_state();
        let mut cache = PeripheralCache::new();
        let mut publisher = CountingPublisher::default();

        cache.latch_orientation(PeripheralIndex::LeftFoot, write_vec3_le([0.0, 0.0, 50.0]));
        cache.latch_force(PeripheralIndex::LeftFoot, write_i32_le(250));

        assert!(ingest.on_update(
            &mut state,
            &mut cache,
            &mut publisher,
            PeripheralIndex::LeftFoot,
            Instant::now() + std::time::Duration::from_secs(1),
        ));
        // Speed, both lengths, stride, cadence — five float publishes.
        assert_eq!(publisher.float_publishes, 5);
        // The contact registered a step and published the count.
        assert_eq!(publisher.step_counts, vec![1]);
    }
}
