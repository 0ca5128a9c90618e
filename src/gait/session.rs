//! Session control: start/stop/reset over the gait aggregate.
//!
//! Stop and Reset perform the same zeroing; Reset additionally forces the
//! phase to `Stopped` even when it already is (idempotent). The zeroing is
//! atomic from any observer's perspective because all mutation happens on
//! the single ingestion task — no partially-zeroed state is ever published.

use std::time::Instant;

use tracing::info;

use crate::types::{GaitState, SessionPhase};

/// Handle a start-channel write.
///
/// `true` arms the session and stamps its start time; accumulators carry
/// whatever values they held (a start does not zero). `false` is an explicit
/// stop: the session halts and all accumulated metrics are zeroed.
pub fn handle_start(state: &mut GaitState, value: bool, now: Instant) {
    if value {
        state.phase = SessionPhase::Running;
        state.session_start = Some(now);
        info!("Gait session started");
    } else {
        state.phase = SessionPhase::Stopped;
        zero_accumulated(state);
        info!("Gait session stopped — metrics zeroed");
    }
}

/// Handle a reset-channel write. `false` is a no-op.
pub fn handle_reset(state: &mut GaitState, value: bool) {
    if !value {
        return;
    }
    state.phase = SessionPhase::Stopped;
    zero_accumulated(state);
    info!("Gait metrics reset to zero");
}

/// Zero every accumulated counter, rate and length.
///
/// The shared debounce timestamp and the per-foot contact flags are
/// deliberately left untouched — they belong to the edge trigger, not the
/// session accumulators.
fn zero_accumulated(state: &mut GaitState) {
    state.step_count = 0;
    state.walking_speed = 0.0;
    state.left_step_length = 0.0;
    state.right_step_length = 0.0;
    state.stride_length = 0.0;
    state.left_step_rate = 0.0;
    state.right_step_rate = 0.0;
    state.left_steps = 0;
    state.right_steps = 0;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn accumulated_state() -> GaitState {
        let mut state = GaitState::new();
        state.phase = SessionPhase::Running;
        state.session_start = Some(Instant::now());
        state.step_count = 5;
        state.left_steps = 3;
        state.right_steps = 2;
        state.left_step_rate = 1.5;
        state.right_step_rate = 1.0;
        state.left_step_length = 0.6;
        state.right_step_length = 0.7;
        state.stride_length = 1.3;
        state.walking_speed = 1.4;
        state.cadence = 64.0;
        state.last_step = Some(Instant::now());
        state.left_contact = true;
        state
    }

    fn assert_zeroed(state: &GaitState) {
        assert_eq!(state.step_count, 0);
        assert_eq!(state.walking_speed, 0.0);
        assert_eq!(state.left_step_length, 0.0);
        assert_eq!(state.right_step_length, 0.0);
        assert_eq!(state.stride_length, 0.0);
        assert_eq!(state.left_step_rate, 0.0);
        assert_eq!(state.right_step_rate, 0.0);
        assert_eq!(state.left_steps, 0);
        assert_eq!(state.right_steps, 0);
    }

    #[test]
    fn explicit_stop_zeroes_while_running() {
        let mut state = accumulated_state();
        handle_start(&mut state, false, Instant::now());
        assert_eq!(state.phase, SessionPhase::Stopped);
        assert_zeroed(&state);
        // Detector state survives a stop.
        assert!(state.last_step.is_some());
        assert!(state.left_contact);
    }

    #[test]
    fn reset_is_idempotent_and_works_while_stopped() {
        let mut state = accumulated_state();
        handle_reset(&mut state, true);
        assert_eq!(state.phase, SessionPhase::Stopped);
        assert_zeroed(&state);

        handle_reset(&mut state, true);
        assert_eq!(state.phase, SessionPhase::Stopped);
        assert_zeroed(&state);
    }

    #[test]
    fn reset_false_is_a_no_op() {
        let mut state = accumulated_state();
        handle_reset(&mut state, false);
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.step_count, 5);
    }

    #[test]
    fn start_arms_without_touching_counters() {
        let mut state = GaitState::new();
        state.step_count = 2;
        let now = Instant::now();
        handle_start(&mut state, true, now);
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.session_start, Some(now));
        assert_eq!(state.step_count, 2);
    }

    #[test]
    fn restart_restamps_session_start() {
        let mut state = GaitState::new();
        let t0 = Instant::now();
        handle_start(&mut state, true, t0);
        let t1 = t0 + Duration::from_secs(5);
        handle_start(&mut state, true, t1);
        assert_eq!(state.session_start, Some(t1));
    }
}
