//! Processing Pipeline Module
//!
//! ```text
//! FrameSource ──► PeripheralCache ──► SensorIngest ──► MetricsPublisher
//!    (async)         (latched)          (sync core)       (outbound)
//!                         ▲
//!            control frames ──► session handlers
//! ```
//!
//! The loop owns the only mutable [`GaitState`](crate::types::GaitState);
//! every core mutation happens inline on this task, which is what makes
//! session zeroing atomic for observers.

mod processing_loop;

pub use processing_loop::{PipelineStats, ProcessingLoop};
