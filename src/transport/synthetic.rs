//! Synthetic walking pattern generator.
//!
//! Produces the frame stream a three-peripheral rig would notify while its
//! wearer walks at a steady pace: alternating foot contacts with plausible
//! FSR/yaw excursions and a hip acceleration trace that stays above the
//! motion gate. Used by the default input mode and the `walk-sim` binary;
//! deterministic for a given seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::transport::WireFrame;

/// Generator tick period (ms); one tick emits one notification burst.
pub const TICK_MS: u64 = 50;

/// Full gait cycle length in ticks (left stance then right stance).
///
/// 32 ticks at 50 ms = 1.6 s per cycle, so contact rising edges alternate
/// every 800 ms — comfortably outside the 700 ms shared debounce window.
pub const CYCLE_TICKS: u64 = 32;

/// Steady-pace walking pattern over the three peripherals.
#[derive(Debug)]
pub struct WalkPattern {
    rng: StdRng,
    tick: u64,
}

impl WalkPattern {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            tick: 0,
        }
    }

    /// Frames notified during one tick, in wire order.
    ///
    /// The very first tick is preceded by a session-start control write, the
    /// way the rig's companion app arms the session before data flows.
    pub fn tick_frames(&mut self) -> Vec<WireFrame> {
        let mut frames = Vec::with_capacity(6);
        if self.tick == 0 {
            frames.push(WireFrame::Start { value: true });
        }

        let phase = self.tick % CYCLE_TICKS;
        let left_stance = phase < CYCLE_TICKS / 2;

        frames.push(self.hip_accel_frame());
        frames.push(self.foot_force_frame(0, left_stance));
        frames.push(self.foot_orientation_frame(0, left_stance));
        frames.push(self.foot_force_frame(1, !left_stance));
        frames.push(self.foot_orientation_frame(1, !left_stance));

        self.tick += 1;
        frames
    }

    fn hip_accel_frame(&mut self) -> WireFrame {
        // Vertical bounce around 1.35 g with a per-cycle swing; the
        // magnitude stays above the 1.10 g motion gate while walking.
        let cycle_pos = (self.tick % CYCLE_TICKS) as f32 / CYCLE_TICKS as f32;
        let bounce = (cycle_pos * 2.0 * std::f32::consts::PI).sin() * 0.12;
        WireFrame::Accel {
            index: 2,
            x: self.rng.gen_range(-0.08..0.08),
            y: self.rng.gen_range(-0.08..0.08),
            z: 1.35 + bounce + self.rng.gen_range(-0.04..0.04),
        }
    }

    fn foot_force_frame(&mut self, index: u8, stance: bool) -> WireFrame {
        let fsr = if stance {
            self.rng.gen_range(230..280)
        } else {
            self.rng.gen_range(5..40)
        };
        WireFrame::Force { index, fsr }
    }

    fn foot_orientation_frame(&mut self, index: u8, stance: bool) -> WireFrame {
        let yaw = if stance {
            self.rng.gen_range(40.0..65.0)
        } else {
            self.rng.gen_range(135.0..160.0)
        };
        WireFrame::Orientation {
            index,
            roll: self.rng.gen_range(-6.0..6.0),
            pitch: self.rng.gen_range(-10.0..10.0),
            yaw,
        }
    }
}
