//! Shared data structures for the gait pipeline.
//!
//! Two layers: raw sensor samples as they arrive from the peripherals
//! ([`samples`]) and the mutable gait aggregate plus its published
//! snapshot view ([`state`]).

mod samples;
mod state;

pub use samples::{AccelerationSample, Foot, ForceSample, OrientationSample, PeripheralIndex};
pub use state::{GaitSnapshot, GaitState, SessionPhase};
