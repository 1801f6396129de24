//! Commands that take effect within a single tick.

use super::traits::{Motion, Progress};
use crate::animation::AnimationState;
use crate::geometry::FaceLayout;
use crate::options::Color;

/// A one-tick state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstantMotion {
    /// Set the curious flag.
    Curious(bool),
    /// Set both fill colors.
    Colors {
        /// Background fill.
        background: Color,
        /// Eye fill.
        eye: Color,
    },
}

impl Motion for InstantMotion {
    fn step(
        &mut self,
        _layout: &FaceLayout,
        state: &mut AnimationState,
    ) -> Progress {
        match *self {
            Self::Curious(curious) => state.curious = curious,
            Self::Colors { background, eye } => {
                state.background_color = background;
                state.eye_color = eye;
            }
        }
        Progress::Done
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Curious(_) => "set_curious",
            Self::Colors { .. } => "set_colors",
        }
    }
}
