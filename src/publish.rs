//! Outbound metric publication.
//!
//! On the rig each derived quantity is written to its own notify
//! characteristic; here that boundary is the [`MetricsPublisher`] trait,
//! one call per published value. The processing loop additionally exposes a
//! coalesced snapshot over a watch channel for in-process observers.

use tracing::{debug, info};

/// Outbound side of the transport collaborator.
///
/// Called once per qualifying ingestion pass while the session is Running:
/// `publish_step_count` at step-registration time, the float metrics on
/// every pass.
pub trait MetricsPublisher: Send + 'static {
    fn publish_step_count(&mut self, steps: u32);
    fn publish_walking_speed(&mut self, speed_mps: f32);
    fn publish_left_step_length(&mut self, meters: f32);
    fn publish_right_step_length(&mut self, meters: f32);
    fn publish_stride_length(&mut self, meters: f32);
    fn publish_cadence(&mut self, steps_per_min: f32);
}

/// Publisher that writes metrics to the tracing output.
///
/// Stands in for the notify characteristics when running against replayed
/// or synthetic data. Step counts land at info (they are discrete events);
/// the continuously republished floats at debug.
#[derive(Debug, Default)]
pub struct TracingPublisher;

impl MetricsPublisher for TracingPublisher {
    fn publish_step_count(&mut self, steps: u32) {
        info!(steps, "step registered");
    }

    fn publish_walking_speed(&mut self, speed_mps: f32) {
        debug!(speed_mps, "walking speed");
    }

    fn publish_left_step_length(&mut self, meters: f32) {
        debug!(meters, "left step length");
    }

    fn publish_right_step_length(&mut self, meters: f32) {
        debug!(meters, "right step length");
    }

    fn publish_stride_length(&mut self, meters: f32) {
        debug!(meters, "stride length");
    }

    fn publish_cadence(&mut self, steps_per_min: f32) {
        debug!(steps_per_min, "cadence");
    }
}
