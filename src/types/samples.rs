//! Raw sensor sample types for the three-peripheral rig.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed peripheral roster of the rig.
///
/// Indices are wire-level identities, not dynamically registered: the
/// transport always maps slot 0 to the left foot, 1 to the right foot and
/// 2 to the hip unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeripheralIndex {
    LeftFoot = 0,
    RightFoot = 1,
    Hip = 2,
}

impl PeripheralIndex {
    /// Number of peripherals in the rig.
    pub const COUNT: usize = 3;

    /// All peripherals in wire order.
    pub const ALL: [Self; Self::COUNT] = [Self::LeftFoot, Self::RightFoot, Self::Hip];

    /// Map a wire-level index to a peripheral. Returns `None` for anything
    /// outside 0..=2 — the transport boundary rejects those before the core
    /// ever sees them.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::LeftFoot),
            1 => Some(Self::RightFoot),
            2 => Some(Self::Hip),
            _ => None,
        }
    }

    /// Slot position for per-peripheral storage arrays.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// The foot this peripheral instruments, if it is a foot unit.
    pub fn foot(self) -> Option<Foot> {
        match self {
            Self::LeftFoot => Some(Foot::Left),
            Self::RightFoot => Some(Foot::Right),
            Self::Hip => None,
        }
    }
}

impl fmt::Display for PeripheralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeftFoot => write!(f, "left-foot"),
            Self::RightFoot => write!(f, "right-foot"),
            Self::Hip => write!(f, "hip"),
        }
    }
}

/// Left or right foot, for per-foot gait state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Foot {
    Left,
    Right,
}

impl fmt::Display for Foot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Orientation angles from a peripheral's IMU (device-native degrees).
///
/// Only `yaw` feeds step detection; roll and pitch are retained for
/// diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

/// Plantar-pressure reading from a foot peripheral's force-sensitive
/// resistor (raw analog units). Each foot unit carries exactly one FSR, so
/// which side a reading belongs to is determined by the peripheral index it
/// arrived on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceSample {
    pub fsr: i32,
}

/// Three-axis accelerometer reading from the hip peripheral, in g.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelerationSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelerationSample {
    /// Euclidean magnitude of the acceleration vector (g).
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}
