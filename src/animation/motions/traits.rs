//! Core trait for per-tick motions.

use crate::animation::AnimationState;
use crate::geometry::FaceLayout;

/// Result of one motion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Targets not reached yet; step again next tick.
    Running,
    /// All targets reached. The motion must not be stepped again.
    Done,
}

/// A stepped state machine that drives [`AnimationState`] toward a target.
///
/// A motion whose targets already hold reports [`Progress::Done`] on its
/// first step without touching the state.
pub trait Motion: Send {
    /// Advance by one tick.
    fn step(
        &mut self,
        layout: &FaceLayout,
        state: &mut AnimationState,
    ) -> Progress;

    /// Name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Move `current` toward `target` by at most `step`.
pub(crate) fn approach(current: i32, target: i32, step: i32) -> i32 {
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

/// Float variant of [`approach`]. Lands exactly on `target`.
pub(crate) fn approach_f32(current: f32, target: f32, step: f32) -> f32 {
    if (target - current).abs() <= step {
        target
    } else {
        current + step.copysign(target - current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_stops_at_target() {
        assert_eq!(approach(0, 5, 2), 2);
        assert_eq!(approach(4, 5, 2), 5);
        assert_eq!(approach(5, 2, 4), 2);
        assert_eq!(approach(3, 3, 4), 3);
    }

    #[test]
    fn float_approach_lands_exactly() {
        let mut x = 27.0_f32;
        let mut ticks = 0;
        while x != 0.0 {
            x = approach_f32(x, 0.0, 0.5);
            ticks += 1;
        }
        assert_eq!(ticks, 54);
        assert!((approach_f32(-0.3, 1.0, 2.0) - 1.0).abs() < f32::EPSILON);
    }
}
