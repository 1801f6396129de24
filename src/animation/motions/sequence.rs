//! Motions that run other motions back to back.

use std::collections::VecDeque;

use super::traits::{Motion, Progress};
use crate::animation::AnimationState;
use crate::geometry::FaceLayout;

/// Runs child motions in order; each starts on the tick after the previous
/// one finished.
pub struct Sequence {
    name: &'static str,
    parts: VecDeque<Box<dyn Motion>>,
}

impl Sequence {
    /// Sequence of `parts`, logged as `name`.
    #[must_use]
    pub fn new(name: &'static str, parts: Vec<Box<dyn Motion>>) -> Self {
        Self {
            name,
            parts: parts.into(),
        }
    }
}

impl Motion for Sequence {
    fn step(
        &mut self,
        layout: &FaceLayout,
        state: &mut AnimationState,
    ) -> Progress {
        let Some(current) = self.parts.front_mut() else {
            return Progress::Done;
        };
        if current.step(layout, state) == Progress::Done {
            let _ = self.parts.pop_front();
        }
        if self.parts.is_empty() {
            Progress::Done
        } else {
            Progress::Running
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
