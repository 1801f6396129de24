//! Expression changes.

use super::traits::{approach, Motion, Progress};
use crate::animation::{AnimationState, EyelidHeights, Expression};
use crate::geometry::FaceLayout;

/// Eyelid movement per tick, in pixels.
const EYELID_STEP: i32 = 2;

/// Eases all six eyelid masks toward the depths of an expression.
///
/// Targets are half of the *current* eye height, so an expression applied
/// to a half-closed eye produces proportionally shallower lids.
#[derive(Debug, Clone)]
pub struct ExpressionMotion {
    expression: Expression,
    target: Option<EyelidHeights>,
}

impl ExpressionMotion {
    /// Motion toward `expression`.
    #[must_use]
    pub const fn new(expression: Expression) -> Self {
        Self {
            expression,
            target: None,
        }
    }
}

impl Motion for ExpressionMotion {
    fn step(
        &mut self,
        _layout: &FaceLayout,
        state: &mut AnimationState,
    ) -> Progress {
        let target = *self.target.get_or_insert_with(|| {
            EyelidHeights::for_expression(
                self.expression,
                state.eye_height_left,
                state.eye_height_right,
            )
        });
        state.expression = self.expression;
        if state.eyelids == target {
            return Progress::Done;
        }

        let mut lids = state.eyelids.to_array();
        for (value, goal) in lids.iter_mut().zip(target.to_array()) {
            *value = approach(*value, goal, EYELID_STEP);
        }
        state.eyelids = EyelidHeights::from_array(lids);

        if state.eyelids == target {
            Progress::Done
        } else {
            Progress::Running
        }
    }

    fn name(&self) -> &'static str {
        "change_face"
    }
}
