//! Latched characteristic cache.
//!
//! Mirrors the notify-then-poll shape of the wireless link: every
//! characteristic keeps its most recent raw value plus a freshness flag that
//! a read consumes. A kind with no fresh value on a given pass is simply not
//! read — the core retains whatever it decoded last.

use crate::codec;
use crate::types::{AccelerationSample, ForceSample, OrientationSample, PeripheralIndex};

/// Read interface the ingestion pass is written against.
///
/// `has_*` peeks at freshness; `read_*` returns the decoded value and clears
/// the flag, or `None` when nothing new arrived since the last read. Force
/// reads are only meaningful for the foot peripherals and acceleration reads
/// only for the hip — the dispatcher upholds that, not the hub.
pub trait SensorHub {
    fn has_orientation_update(&self, index: PeripheralIndex) -> bool;
    fn read_orientation(&mut self, index: PeripheralIndex) -> Option<OrientationSample>;

    fn has_force_update(&self, index: PeripheralIndex) -> bool;
    fn read_force(&mut self, index: PeripheralIndex) -> Option<ForceSample>;

    fn has_accel_update(&self, index: PeripheralIndex) -> bool;
    fn read_accel(&mut self, index: PeripheralIndex) -> Option<AccelerationSample>;
}

/// One latched raw value.
#[derive(Debug, Clone, Copy)]
struct Latched<const N: usize> {
    buf: [u8; N],
    fresh: bool,
}

impl<const N: usize> Default for Latched<N> {
    fn default() -> Self {
        Self {
            buf: [0; N],
            fresh: false,
        }
    }
}

impl<const N: usize> Latched<N> {
    fn latch(&mut self, buf: [u8; N]) {
        self.buf = buf;
        self.fresh = true;
    }

    fn take(&mut self) -> Option<[u8; N]> {
        if self.fresh {
            self.fresh = false;
            Some(self.buf)
        } else {
            None
        }
    }
}

/// Latched raw buffers for every characteristic of every peripheral.
///
/// All three kinds are stored per peripheral slot, matching the link layer's
/// uniform characteristic table; the unused combinations (force on the hip,
/// acceleration on a foot) simply never get latched.
#[derive(Debug, Default)]
pub struct PeripheralCache {
    orientation: [Latched<{ codec::VECTOR_WIDTH }>; PeripheralIndex::COUNT],
    force: [Latched<{ codec::SCALAR_WIDTH }>; PeripheralIndex::COUNT],
    accel: [Latched<{ codec::VECTOR_WIDTH }>; PeripheralIndex::COUNT],
}

impl PeripheralCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a raw orientation notification (packed roll/pitch/yaw).
    pub fn latch_orientation(&mut self, index: PeripheralIndex, buf: [u8; codec::VECTOR_WIDTH]) {
        self.orientation[index.slot()].latch(buf);
    }

    /// Latch a raw force notification.
    pub fn latch_force(&mut self, index: PeripheralIndex, buf: [u8; codec::SCALAR_WIDTH]) {
        self.force[index.slot()].latch(buf);
    }

    /// Latch a raw acceleration notification (packed x/y/z).
    pub fn latch_accel(&mut self, index: PeripheralIndex, buf: [u8; codec::VECTOR_WIDTH]) {
        self.accel[index.slot()].latch(buf);
    }
}

impl SensorHub for PeripheralCache {
    fn has_orientation_update(&self, index: PeripheralIndex) -> bool {
        self.orientation[index.slot()].fresh
    }

    fn read_orientation(&mut self, index: PeripheralIndex) -> Option<OrientationSample> {
        self.orientation[index.slot()].take().map(|buf| {
            let [roll, pitch, yaw] = codec::read_vec3_le(buf);
            OrientationSample { roll, pitch, yaw }
        })
    }

    fn has_force_update(&self, index: PeripheralIndex) -> bool {
        self.force[index.slot()].fresh
    }

    fn read_force(&mut self, index: PeripheralIndex) -> Option<ForceSample> {
        self.force[index.slot()]
            .take()
            .map(|buf| ForceSample { fsr: codec::read_i32_le(buf) })
    }

    fn has_accel_update(&self, index: PeripheralIndex) -> bool {
        self.accel[index.slot()].fresh
    }

    fn read_accel(&mut self, index: PeripheralIndex) -> Option<AccelerationSample> {
        self.accel[index.slot()].take().map(|buf| {
            let [x, y, z] = codec::read_vec3_le(buf);
            AccelerationSample { x, y, z }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{write_i32_le, write_vec3_le};

    #[test]
    fn read_consumes_freshness() {
        let mut cache = PeripheralCache::new();
        let idx = PeripheralIndex::LeftFoot;
        assert!(!cache.has_orientation_update(idx));
        assert!(cache.read_orientation(idx).is_none());

        cache.latch_orientation(idx, write_vec3_le([1.0, 2.0, 50.0]));
        assert!(cache.has_orientation_update(idx));

        let sample = cache.read_orientation(idx).expect("fresh orientation");
        assert_eq!(sample.yaw, 50.0);
        assert!(!cache.has_orientation_update(idx));
        assert!(cache.read_orientation(idx).is_none());
    }

    #[test]
    fn relatching_rearms_freshness() {
        let mut cache = PeripheralCache::new();
        let idx = PeripheralIndex::RightFoot;
        cache.latch_force(idx, write_i32_le(250));
        assert_eq!(cache.read_force(idx).expect("fresh force").fsr, 250);

        cache.latch_force(idx, write_i32_le(30));
        assert!(cache.has_force_update(idx));
        assert_eq!(cache.read_force(idx).expect("fresh force").fsr, 30);
    }

    #[test]
    fn kinds_are_independent_per_peripheral() {
        let mut cache = PeripheralCache::new();
        cache.latch_orientation(PeripheralIndex::LeftFoot, write_vec3_le([0.0, 0.0, 45.0]));
        cache.latch_accel(PeripheralIndex::Hip, write_vec3_le([0.1, 0.2, 1.4]));

        assert!(!cache.has_orientation_update(PeripheralIndex::Hip));
        assert!(!cache.has_accel_update(PeripheralIndex::LeftFoot));
        assert!(cache.has_accel_update(PeripheralIndex::Hip));

        // Reading one kind leaves the other untouched.
        assert!(cache.read_orientation(PeripheralIndex::LeftFoot).is_some());
        assert!(cache.has_accel_update(PeripheralIndex::Hip));
    }
}
