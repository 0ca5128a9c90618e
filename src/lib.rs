//! Gaitsense: Real-Time Gait Metrics
//!
//! Estimates step count, walking speed, per-foot step length, stride length
//! and cadence from a three-peripheral wearable rig (left foot, right foot,
//! hip).
//!
//! ## Architecture
//!
//! - **Gait Core**: step detection, velocity estimation, metric derivation
//!   and session control — synchronous, run-to-completion, all state in one
//!   [`GaitState`](types::GaitState) aggregate.
//! - **Transport**: latched characteristic cache plus frame sources that
//!   stand in for the wireless link (stdin replay, synthetic walker).
//! - **Pipeline**: the async loop wiring frames into ingestion passes and
//!   metrics out to the publisher.

pub mod codec;
pub mod config;
pub mod gait;
pub mod pipeline;
pub mod publish;
pub mod transport;
pub mod types;

// Re-export configuration
pub use config::GaitConfig;

// Re-export commonly used types
pub use types::{
    AccelerationSample, Foot, ForceSample, GaitSnapshot, GaitState, OrientationSample,
    PeripheralIndex, SessionPhase,
};

// Re-export the core components
pub use gait::{SensorIngest, StepDetector, VelocityEstimator};

// Re-export the runtime shell
pub use pipeline::{PipelineStats, ProcessingLoop};
pub use publish::{MetricsPublisher, TracingPublisher};
pub use transport::{
    FrameEvent, FrameSource, PeripheralCache, ScriptedSource, SensorHub, StdinSource,
    SyntheticSource, WireFrame,
};
