//! Gait Configuration - all algorithm thresholds as operator-tunable TOML values.
//!
//! Every tuning value of the detectors is a field in this module. Each struct
//! implements `Default` with values matching the constants in
//! [`defaults`](super::defaults), so behaviour is unchanged when no config
//! file is present.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a gait rig deployment.
///
/// Load with `GaitConfig::load()` which searches:
/// 1. `$GAITSENSE_CONFIG` env var
/// 2. `./gait_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaitConfig {
    /// Step-detection thresholds
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Walking-speed estimator tuning
    #[serde(default)]
    pub velocity: VelocityConfig,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            velocity: VelocityConfig::default(),
        }
    }
}

impl GaitConfig {
    /// Load configuration using the standard search order:
    /// 1. `$GAITSENSE_CONFIG` environment variable
    /// 2. `./gait_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("GAITSENSE_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded gait config from GAITSENSE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from GAITSENSE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "GAITSENSE_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("gait_config.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded gait config from ./gait_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./gait_config.toml, using defaults");
                }
            }
        }

        info!("No gait_config.toml found — using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would make the estimators degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detection.step_debounce_ms == 0 {
            return Err(ConfigError::Invalid(
                "detection.step_debounce_ms must be > 0".into(),
            ));
        }
        if self.velocity.integration_step_s <= 0.0 {
            return Err(ConfigError::Invalid(
                "velocity.integration_step_s must be > 0".into(),
            ));
        }
        if !(self.velocity.decay_rate > 0.0 && self.velocity.decay_rate <= 1.0) {
            return Err(ConfigError::Invalid(
                "velocity.decay_rate must be in (0, 1]".into(),
            ));
        }
        if self.velocity.motion_gate_g < 0.0 {
            return Err(ConfigError::Invalid(
                "velocity.motion_gate_g must be >= 0".into(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Step-detection thresholds (`[detection]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// FSR reading at or above which a foot is loaded (raw analog units).
    #[serde(default = "d_fsr_step_threshold")]
    pub fsr_step_threshold: i32,

    /// Yaw below which a loaded foot counts as a step candidate (degrees).
    #[serde(default = "d_yaw_step_threshold")]
    pub yaw_step_threshold: f32,

    /// Minimum interval between accepted steps, shared across feet (ms).
    #[serde(default = "d_step_debounce_ms")]
    pub step_debounce_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            fsr_step_threshold: defaults::FSR_STEP_THRESHOLD,
            yaw_step_threshold: defaults::YAW_STEP_THRESHOLD,
            step_debounce_ms: defaults::STEP_DEBOUNCE_MS,
        }
    }
}

/// Walking-speed estimator tuning (`[velocity]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityConfig {
    /// Acceleration magnitude above which speed integrates (g).
    #[serde(default = "d_motion_gate_g")]
    pub motion_gate_g: f32,

    /// Integration step used in `fixed-step` mode (seconds).
    #[serde(default = "d_integration_step_s")]
    pub integration_step_s: f32,

    /// Per-update exponential decay applied while below the gate.
    #[serde(default = "d_decay_rate")]
    pub decay_rate: f32,

    /// Integration time base.
    ///
    /// `fixed-step` reproduces the rig's constant 0.01 s step regardless of
    /// real sample spacing; `measured` substitutes the true elapsed time
    /// between velocity updates. The two produce different speed
    /// trajectories — `measured` is opt-in, never applied silently.
    #[serde(default)]
    pub integration: IntegrationMode,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            motion_gate_g: defaults::MOTION_GATE_G,
            integration_step_s: defaults::INTEGRATION_STEP_S,
            decay_rate: defaults::SPEED_DECAY_RATE,
            integration: IntegrationMode::default(),
        }
    }
}

/// Time base for the leaky integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationMode {
    /// Constant `integration_step_s` per update (rig-faithful default).
    #[default]
    FixedStep,
    /// Real elapsed time since the previous velocity update.
    Measured,
}

// serde default fns — serde requires paths, not expressions
fn d_fsr_step_threshold() -> i32 {
    defaults::FSR_STEP_THRESHOLD
}
fn d_yaw_step_threshold() -> f32 {
    defaults::YAW_STEP_THRESHOLD
}
fn d_step_debounce_ms() -> u64 {
    defaults::STEP_DEBOUNCE_MS
}
fn d_motion_gate_g() -> f32 {
    defaults::MOTION_GATE_G
}
fn d_integration_step_s() -> f32 {
    defaults::INTEGRATION_STEP_S
}
fn d_decay_rate() -> f32 {
    defaults::SPEED_DECAY_RATE
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration loading / validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
