//! Dependent-metric derivation: step lengths, stride length, cadence.

use crate::types::GaitState;

/// Recompute the derived metrics from walking speed and per-foot step rates.
///
/// Step lengths are only recomputed while the corresponding step rate is
/// non-zero; with a zero divisor the previous value is *retained*, not
/// reset. Stride length is recomputed unconditionally as the sum of both
/// step lengths. Cadence is zero exactly when stride length is zero.
pub fn recompute(state: &mut GaitState) {
    if state.left_step_rate != 0.0 {
        state.left_step_length = state.walking_speed / state.left_step_rate;
    }
    if state.right_step_rate != 0.0 {
        state.right_step_length = state.walking_speed / state.right_step_rate;
    }
    state.stride_length = state.left_step_length + state.right_step_length;

    state.cadence = if state.stride_length > 0.0 {
        (state.walking_speed * 60.0) / state.stride_length
    } else {
        0.0
    };
}
