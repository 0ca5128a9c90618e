//! Gait Core
//!
//! The sensor-fusion and metric-derivation pipeline, in invocation order:
//!
//! ```text
//! SensorIngest (orientation-gated dispatch)
//!   ├── StepDetector      edge-triggered step events, shared debounce
//!   ├── VelocityEstimator leaky-integrated walking speed
//!   └── deriver           step lengths, stride length, cadence
//! SessionControl (session)  start/stop/reset gating + atomic zeroing
//! ```
//!
//! Every function here is synchronous and runs to completion; all state
//! lives in [`GaitState`](crate::types::GaitState), passed in by the caller.

mod deriver;
mod ingest;
pub mod session;
mod step_detector;
mod velocity;

pub use deriver::recompute;
pub use ingest::SensorIngest;
pub use step_detector::StepDetector;
pub use velocity::VelocityEstimator;
