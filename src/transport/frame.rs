//! Wire frames for the replay/simulation sources.
//!
//! The real link notifies raw characteristic buffers; the replay sources
//! speak one JSON object per line instead, tagged by `kind`. A frame is
//! validated against the fixed peripheral roster and then latched into the
//! [`PeripheralCache`] as the packed bytes the core-facing reads decode.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{write_i32_le, write_vec3_le};
use crate::transport::PeripheralCache;
use crate::types::PeripheralIndex;

/// One transport event, as carried on the replay wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WireFrame {
    /// Orientation notification from peripheral `index`.
    Orientation {
        index: u8,
        roll: f32,
        pitch: f32,
        yaw: f32,
    },
    /// Force notification from a foot peripheral.
    Force { index: u8, fsr: i32 },
    /// Accelerometer notification from the hip peripheral.
    Accel { index: u8, x: f32, y: f32, z: f32 },
    /// Session start/stop control write.
    Start { value: bool },
    /// Session reset control write.
    Reset { value: bool },
}

/// Frame validation failures at the transport boundary.
///
/// The core itself never validates peripheral indices (that is an unchecked
/// precondition of the dispatch); frames from outside the process are
/// checked here instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("peripheral index {0} outside the fixed roster 0..=2")]
    InvalidPeripheral(u8),

    #[error("force frame from non-foot peripheral {0}")]
    ForceFromNonFoot(PeripheralIndex),

    #[error("accel frame from non-hip peripheral {0}")]
    AccelFromNonHip(PeripheralIndex),
}

impl WireFrame {
    /// True for the session control frames.
    pub fn is_control(&self) -> bool {
        matches!(self, WireFrame::Start { .. } | WireFrame::Reset { .. })
    }

    /// Validate a sample frame and latch its payload into the cache.
    ///
    /// Returns the peripheral whose data changed, or `None` for control
    /// frames (which never touch the cache).
    pub fn latch_into(
        &self,
        cache: &mut PeripheralCache,
    ) -> Result<Option<PeripheralIndex>, FrameError> {
        match *self {
            WireFrame::Orientation {
                index,
                roll,
                pitch,
                yaw,
            } => {
                let idx = PeripheralIndex::from_raw(index)
                    .ok_or(FrameError::InvalidPeripheral(index))?;
                cache.latch_orientation(idx, write_vec3_le([roll, pitch, yaw]));
                Ok(Some(idx))
            }
            WireFrame::Force { index, fsr } => {
                let idx = PeripheralIndex::from_raw(index)
                    .ok_or(FrameError::InvalidPeripheral(index))?;
                if idx.foot().is_none() {
                    return Err(FrameError::ForceFromNonFoot(idx));
                }
                cache.latch_force(idx, write_i32_le(fsr));
                Ok(Some(idx))
            }
            WireFrame::Accel { index, x, y, z } => {
                let idx = PeripheralIndex::from_raw(index)
                    .ok_or(FrameError::InvalidPeripheral(index))?;
                if idx != PeripheralIndex::Hip {
                    return Err(FrameError::AccelFromNonHip(idx));
                }
                cache.latch_accel(idx, write_vec3_le([x, y, z]));
                Ok(Some(idx))
            }
            WireFrame::Start { .. } | WireFrame::Reset { .. } => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::SensorHub;

    #[test]
    fn json_wire_format_round_trips() {
        let line = r#"{"kind":"orientation","index":0,"roll":1.0,"pitch":-2.0,"yaw":50.0}"#;
        let frame: WireFrame = serde_json::from_str(line).expect("orientation frame parses");
        assert_eq!(
            frame,
            WireFrame::Orientation {
                index: 0,
                roll: 1.0,
                pitch: -2.0,
                yaw: 50.0
            }
        );

        let control: WireFrame =
            serde_json::from_str(r#"{"kind":"start","value":true}"#).expect("control frame parses");
        assert!(control.is_control());
    }

    #[test]
    fn latch_decodes_back_through_the_codec() {
        let mut cache = PeripheralCache::new();
        let frame = WireFrame::Accel {
            index: 2,
            x: 0.3,
            y: -0.4,
            z: 1.2,
        };
        let idx = frame
            .latch_into(&mut cache)
            .expect("valid accel frame")
            .expect("sample frame targets a peripheral");
        assert_eq!(idx, PeripheralIndex::Hip);

        let accel = cache.read_accel(idx).expect("fresh accel");
        assert_eq!((accel.x, accel.y, accel.z), (0.3, -0.4, 1.2));
    }

    #[test]
    fn roster_violations_are_rejected() {
        let mut cache = PeripheralCache::new();

        let bad_index = WireFrame::Orientation {
            index: 7,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
        };
        assert_eq!(
            bad_index.latch_into(&mut cache),
            Err(FrameError::InvalidPeripheral(7))
        );

        let hip_force = WireFrame::Force { index: 2, fsr: 100 };
        assert_eq!(
            hip_force.latch_into(&mut cache),
            Err(FrameError::ForceFromNonFoot(PeripheralIndex::Hip))
        );

        let foot_accel = WireFrame::Accel {
            index: 0,
            x: 0.0,
            y: 0.0,
            z: 1.0,
        };
        assert_eq!(
            foot_accel.latch_into(&mut cache),
            Err(FrameError::AccelFromNonHip(PeripheralIndex::LeftFoot))
        );
    }

    #[test]
    fn control_frames_do_not_touch_the_cache() {
        let mut cache = PeripheralCache::new();
        let frame = WireFrame::Reset { value: true };
        assert_eq!(frame.latch_into(&mut cache), Ok(None));
        for idx in PeripheralIndex::ALL {
            assert!(!cache.has_orientation_update(idx));
        }
    }
}
