//! Fixed-width sample codec.
//!
//! The peripherals notify raw byte buffers: three packed little-endian f32s
//! for orientation and acceleration, one i32 for force. The sensor MCUs are
//! little-endian, so "native" integer byte order on the wire is LE as well.
//! Buffers are fixed-size arrays; malformed lengths cannot reach these
//! functions.

/// Width of a single encoded scalar.
pub const SCALAR_WIDTH: usize = 4;

/// Width of a packed three-scalar vector (roll/pitch/yaw or x/y/z).
pub const VECTOR_WIDTH: usize = 3 * SCALAR_WIDTH;

/// Decode a little-endian IEEE-754 f32.
pub fn read_f32_le(bytes: [u8; SCALAR_WIDTH]) -> f32 {
    f32::from_le_bytes(bytes)
}

/// Decode a little-endian i32.
pub fn read_i32_le(bytes: [u8; SCALAR_WIDTH]) -> i32 {
    i32::from_le_bytes(bytes)
}

/// Decode a packed `[f32; 3]` vector.
pub fn read_vec3_le(bytes: [u8; VECTOR_WIDTH]) -> [f32; 3] {
    let mut out = [0.0_f32; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let mut scalar = [0_u8; SCALAR_WIDTH];
        scalar.copy_from_slice(&bytes[i * SCALAR_WIDTH..(i + 1) * SCALAR_WIDTH]);
        *slot = read_f32_le(scalar);
    }
    out
}

/// Encode an f32 as little-endian bytes.
pub fn write_f32_le(value: f32) -> [u8; SCALAR_WIDTH] {
    value.to_le_bytes()
}

/// Encode an i32 as little-endian bytes.
pub fn write_i32_le(value: i32) -> [u8; SCALAR_WIDTH] {
    value.to_le_bytes()
}

/// Encode a `[f32; 3]` vector as packed little-endian bytes.
pub fn write_vec3_le(values: [f32; 3]) -> [u8; VECTOR_WIDTH] {
    let mut out = [0_u8; VECTOR_WIDTH];
    for (i, value) in values.iter().enumerate() {
        out[i * SCALAR_WIDTH..(i + 1) * SCALAR_WIDTH].copy_from_slice(&value.to_le_bytes());
    }
    out
}
