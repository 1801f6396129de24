//! Gaze movement.

use glam::Vec2;

use super::traits::{approach_f32, Motion, Progress};
use crate::animation::command::{Direction, Speed};
use crate::animation::AnimationState;
use crate::geometry::{compute_constraints, FaceLayout};

/// Moves the gaze toward one of the nine directions.
///
/// Each axis advances independently and stops on its own target, so
/// diagonal moves bend once the shorter axis arrives.
#[derive(Debug, Clone)]
pub struct GazeMotion {
    direction: Direction,
    speed: Speed,
    target: Option<Vec2>,
}

impl GazeMotion {
    /// Motion toward `direction` at `speed`.
    #[must_use]
    pub const fn new(direction: Direction, speed: Speed) -> Self {
        Self {
            direction,
            speed,
            target: None,
        }
    }
}

impl Motion for GazeMotion {
    fn step(
        &mut self,
        layout: &FaceLayout,
        state: &mut AnimationState,
    ) -> Progress {
        let target = if let Some(target) = self.target {
            target
        } else {
            let target =
                self.direction.target(&compute_constraints(layout, state));
            self.target = Some(target);
            target
        };
        if state.gaze == target {
            return Progress::Done;
        }

        let step = self.speed.look_step();
        state.gaze = Vec2::new(
            approach_f32(state.gaze.x, target.x, step),
            approach_f32(state.gaze.y, target.y, step),
        );

        if state.gaze == target {
            Progress::Done
        } else {
            Progress::Running
        }
    }

    fn name(&self) -> &'static str {
        "look"
    }
}
