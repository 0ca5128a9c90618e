//! Transport boundary: everything between the wireless link and the core.
//!
//! The real rig subscribes to BLE characteristics; discovery, connection
//! supervision and notification plumbing are that collaborator's problem.
//! This module models only what the core consumes from it:
//!
//! - [`PeripheralCache`]: latched per-characteristic byte buffers with
//!   "has a new value since last read" semantics.
//! - [`SensorHub`]: the read interface the ingestion pass is written against.
//! - [`FrameSource`] implementations that stand in for the link's polling
//!   loop (stdin replay, synthetic walker).

mod cache;
mod frame;
mod source;
pub mod synthetic;

pub use cache::{PeripheralCache, SensorHub};
pub use frame::{FrameError, WireFrame};
pub use source::{FrameEvent, FrameSource, ScriptedSource, StdinSource, SyntheticSource};
