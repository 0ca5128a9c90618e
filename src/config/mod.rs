//! Gait Configuration Module
//!
//! Provides rig configuration loaded from TOML files, replacing hardcoded
//! detection thresholds with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `GAITSENSE_CONFIG` environment variable (path to TOML file)
//! 2. `gait_config.toml` in the current working directory
//! 3. Built-in defaults (the rig's deployed constants)
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(GaitConfig::load());
//!
//! // Anywhere in the codebase:
//! let threshold = config::get().detection.fsr_step_threshold;
//! ```

mod gait_config;
pub mod defaults;

pub use gait_config::*;

use std::sync::OnceLock;

/// Global gait configuration, initialized once at startup.
static GAIT_CONFIG: OnceLock<GaitConfig> = OnceLock::new();

/// Initialize the global gait configuration.
///
/// Must be called exactly once before any calls to `get()`.
pub fn init(config: GaitConfig) {
    if GAIT_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once — ignoring");
    }
}

/// Get a reference to the global gait configuration.
///
/// Panics if `init()` has not been called. This is by design — a missing
/// config is a fatal startup error, not a recoverable condition.
pub fn get() -> &'static GaitConfig {
    GAIT_CONFIG
        .get()
        .expect("config::get() called before config::init() — this is a startup bug")
}

/// Check whether the config has been initialized.
///
/// Useful for tests and optional config paths.
pub fn is_initialized() -> bool {
    GAIT_CONFIG.get().is_some()
}
