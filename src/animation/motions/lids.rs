//! Closing and opening the eyes.

use super::traits::{approach, Motion, Progress};
use crate::animation::command::Speed;
use crate::animation::{AnimationState, ClosedState, EyeSelector, Side};
use crate::geometry::{FaceLayout, MIN_EYE_SIZE};

/// Direction of a [`LidMotion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LidAction {
    /// Shrink heights to [`MIN_EYE_SIZE`].
    Close,
    /// Restore the configured heights.
    Open,
}

/// Steps the selected eye heights, then updates the closed state.
#[derive(Debug, Clone)]
pub struct LidMotion {
    action: LidAction,
    eye: EyeSelector,
    speed: Speed,
    started: bool,
}

impl LidMotion {
    /// Motion that applies `action` to `eye`.
    #[must_use]
    pub const fn new(
        action: LidAction,
        eye: EyeSelector,
        speed: Speed,
    ) -> Self {
        Self {
            action,
            eye,
            speed,
            started: false,
        }
    }

    /// Whether the command has nothing to do in `closed`.
    fn redundant(&self, closed: ClosedState) -> bool {
        match self.action {
            LidAction::Close => closed.covers(self.eye),
            LidAction::Open => closed == ClosedState::None,
        }
    }

    fn target(&self, layout: &FaceLayout, side: Side) -> i32 {
        match self.action {
            LidAction::Close => MIN_EYE_SIZE,
            LidAction::Open => layout.shape(side).height,
        }
    }
}

impl Motion for LidMotion {
    fn step(
        &mut self,
        layout: &FaceLayout,
        state: &mut AnimationState,
    ) -> Progress {
        if !self.started {
            self.started = true;
            if self.redundant(state.closed) {
                log::warn!(
                    "{}: {:?} already {}",
                    self.name(),
                    self.eye,
                    match self.action {
                        LidAction::Close => "closed",
                        LidAction::Open => "open",
                    }
                );
                return Progress::Done;
            }
        }

        let mut arrived = true;
        for side in Side::BOTH {
            if !self.eye.includes(side) {
                continue;
            }
            let target = self.target(layout, side);
            let next =
                approach(state.eye_height(side), target, self.speed.lid_step());
            state.set_eye_height(side, next);
            arrived &= next == target;
        }
        if !arrived {
            return Progress::Running;
        }

        state.closed = match self.action {
            LidAction::Close => state.closed.union(self.eye),
            LidAction::Open => state.closed.without(self.eye),
        };
        Progress::Done
    }

    fn name(&self) -> &'static str {
        match self.action {
            LidAction::Close => "close_eyes",
            LidAction::Open => "open_eyes",
        }
    }
}
