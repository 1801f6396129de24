//! Single-writer owner of the face state.

use std::collections::VecDeque;

use super::command::FaceCommand;
use super::motions::{motion_for, Motion, Progress};
use super::state::AnimationState;
use crate::geometry::FaceLayout;
use crate::options::RenderOptions;

/// What one [`FaceAnimator::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No command was active or queued.
    Idle,
    /// The active command advanced but has not converged.
    Stepped,
    /// The active command converged on this tick.
    Completed(FaceCommand),
}

struct ActiveMotion {
    command: FaceCommand,
    motion: Box<dyn Motion>,
}

/// Runs queued commands against the face state, one step per tick.
///
/// Commands execute strictly in FIFO order. Only the command at the head of
/// the queue is ever stepped; it resolves its targets from the state left
/// behind by its predecessor.
pub struct FaceAnimator {
    layout: FaceLayout,
    state: AnimationState,
    queue: VecDeque<FaceCommand>,
    active: Option<ActiveMotion>,
}

impl FaceAnimator {
    /// Animator for an open, centered face.
    #[must_use]
    pub fn new(layout: FaceLayout, render: &RenderOptions) -> Self {
        Self {
            state: AnimationState::new(&layout, render),
            layout,
            queue: VecDeque::new(),
            active: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Layout the state is animated against.
    #[must_use]
    pub const fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    /// Append a command to the queue.
    pub fn enqueue(&mut self, command: FaceCommand) {
        self.queue.push_back(command);
    }

    /// Number of commands not yet completed, including the active one.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len() + usize::from(self.active.is_some())
    }

    /// Whether nothing is active or queued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Drop the active command and everything queued. Returns how many
    /// commands were dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.pending();
        if let Some(active) = self.active.take() {
            log::debug!("cancelled {}", active.motion.name());
        }
        self.queue.clear();
        dropped
    }

    /// Advance the active command by one step, starting the next queued
    /// command if none is active.
    pub fn tick(&mut self) -> TickOutcome {
        if self.active.is_none() {
            let Some(command) = self.queue.pop_front() else {
                return TickOutcome::Idle;
            };
            log::debug!("starting {}", command.name());
            self.active = Some(ActiveMotion {
                command,
                motion: motion_for(command),
            });
        }
        let Some(active) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };

        match active.motion.step(&self.layout, &mut self.state) {
            Progress::Running => TickOutcome::Stepped,
            Progress::Done => {
                let command = active.command;
                self.active = None;
                log::debug!("finished {}", command.name());
                TickOutcome::Completed(command)
            }
        }
    }

    /// Enqueue `command` and tick until the queue drains. Returns the number
    /// of ticks taken.
    ///
    /// Every motion converges, so this always terminates.
    pub fn apply(&mut self, command: FaceCommand) -> usize {
        self.enqueue(command);
        let mut ticks = 0;
        while self.tick() != TickOutcome::Idle {
            ticks += 1;
        }
        ticks
    }
}

impl std::fmt::Debug for FaceAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceAnimator")
            .field("state", &self.state)
            .field("queue", &self.queue)
            .field("active", &self.active.as_ref().map(|a| a.command))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::animation::command::{Direction, Speed};
    use crate::animation::{ClosedState, EyeSelector, EyelidHeights, Expression};
    use crate::geometry::{self, MIN_EYE_SIZE};
    use crate::options::EyeOptions;

    fn animator() -> FaceAnimator {
        let layout = FaceLayout::new(&EyeOptions::default(), 128, 64);
        FaceAnimator::new(layout, &RenderOptions::default())
    }

    const fn look(direction: Direction, speed: Speed) -> FaceCommand {
        FaceCommand::Look { direction, speed }
    }

    #[test]
    fn look_top_right_then_back_to_center() {
        let mut a = animator();
        let _ = a.apply(look(Direction::TopRight, Speed::Fast));
        assert_eq!(a.state().gaze, Vec2::new(27.0, -16.0));

        let ticks = a.apply(look(Direction::Center, Speed::Slow));
        assert_eq!(a.state().gaze, Vec2::ZERO);
        // 27px at half a pixel per tick
        assert_eq!(ticks, 54);
    }

    #[test]
    fn gaze_axes_stop_independently() {
        let mut a = animator();
        a.enqueue(look(Direction::TopRight, Speed::Fast));
        for _ in 0..8 {
            assert_eq!(a.tick(), TickOutcome::Stepped);
        }
        // y reached -16 after 8 steps, x keeps moving
        assert_eq!(a.state().gaze, Vec2::new(16.0, -16.0));
        let _ = a.tick();
        assert_eq!(a.state().gaze, Vec2::new(18.0, -16.0));
    }

    #[test]
    fn close_then_open_restores_the_face() {
        let mut a = animator();
        let _ = a.apply(FaceCommand::CloseEyes {
            eye: EyeSelector::Both,
            speed: Speed::Fast,
        });
        assert_eq!(a.state().closed, ClosedState::Both);
        assert_eq!(a.state().eye_height_left, MIN_EYE_SIZE);
        assert_eq!(a.state().eye_height_right, MIN_EYE_SIZE);

        let _ = a.apply(FaceCommand::OpenEyes {
            eye: EyeSelector::Both,
            speed: Speed::Fast,
        });
        assert_eq!(a.state().closed, ClosedState::None);
        assert_eq!(a.state().eye_height_left, 32);
        assert_eq!(a.state().eye_height_right, 32);
    }

    #[test]
    fn blink_ends_open_for_every_selection() {
        for eye in [EyeSelector::Left, EyeSelector::Right, EyeSelector::Both] {
            for speed in [Speed::Slow, Speed::Medium, Speed::Fast] {
                let mut a = animator();
                let ticks = a.apply(FaceCommand::Blink { eye, speed });
                assert!(ticks > 2);
                assert_eq!(a.state().closed, ClosedState::None);
                assert_eq!(a.state().eye_height_left, 32);
                assert_eq!(a.state().eye_height_right, 32);
            }
        }
    }

    #[test]
    fn blink_passes_through_closed() {
        let mut a = animator();
        a.enqueue(FaceCommand::Blink {
            eye: EyeSelector::Left,
            speed: Speed::Fast,
        });
        let mut saw_closed = false;
        while a.tick() != TickOutcome::Idle {
            saw_closed |= a.state().closed == ClosedState::Left;
            assert_eq!(a.state().eye_height_right, 32);
        }
        assert!(saw_closed);
    }

    #[test]
    fn closing_an_open_eye_keeps_the_other_closed() {
        let mut a = animator();
        let _ = a.apply(FaceCommand::CloseEyes {
            eye: EyeSelector::Right,
            speed: Speed::Fast,
        });
        let _ = a.apply(FaceCommand::CloseEyes {
            eye: EyeSelector::Left,
            speed: Speed::Fast,
        });
        assert_eq!(a.state().closed, ClosedState::Both);

        let _ = a.apply(FaceCommand::OpenEyes {
            eye: EyeSelector::Left,
            speed: Speed::Fast,
        });
        assert_eq!(a.state().closed, ClosedState::Right);
        assert_eq!(a.state().eye_height_left, 32);
        assert_eq!(a.state().eye_height_right, MIN_EYE_SIZE);
    }

    #[test]
    fn redundant_commands_finish_without_changes() {
        let mut a = animator();
        let before = *a.state();
        a.enqueue(FaceCommand::OpenEyes {
            eye: EyeSelector::Both,
            speed: Speed::Slow,
        });
        assert!(matches!(a.tick(), TickOutcome::Completed(_)));
        assert_eq!(*a.state(), before);

        a.enqueue(look(Direction::Center, Speed::Fast));
        assert!(matches!(a.tick(), TickOutcome::Completed(_)));
        assert_eq!(*a.state(), before);

        let _ = a.apply(FaceCommand::CloseEyes {
            eye: EyeSelector::Both,
            speed: Speed::Fast,
        });
        let closed = *a.state();
        a.enqueue(FaceCommand::CloseEyes {
            eye: EyeSelector::Left,
            speed: Speed::Fast,
        });
        assert!(matches!(a.tick(), TickOutcome::Completed(_)));
        assert_eq!(*a.state(), closed);
    }

    #[test]
    fn happy_then_default_clears_the_lids() {
        let mut a = animator();
        let _ = a.apply(FaceCommand::ChangeFace {
            expression: Expression::Happy,
        });
        assert_eq!(a.state().expression, Expression::Happy);
        assert_eq!(a.state().eyelids.bottom_left, 16);
        assert_eq!(a.state().eyelids.bottom_right, 16);

        let _ = a.apply(FaceCommand::ChangeFace {
            expression: Expression::Default,
        });
        assert_eq!(a.state().eyelids, EyelidHeights::ZERO);
    }

    #[test]
    fn expression_switch_moves_every_lid_together() {
        let mut a = animator();
        let _ = a.apply(FaceCommand::ChangeFace {
            expression: Expression::Angry,
        });
        let ticks = a.apply(FaceCommand::ChangeFace {
            expression: Expression::Tired,
        });
        // 16px at 2px per tick
        assert_eq!(ticks, 8);
        let lids = a.state().eyelids;
        assert_eq!(lids.top_inner_left, 0);
        assert_eq!(lids.top_outer_left, 16);
        assert_eq!(lids.top_outer_right, 16);
    }

    #[test]
    fn curious_look_left_distorts_within_cap() {
        let mut a = animator();
        let _ = a.apply(FaceCommand::SetCurious { curious: true });
        let _ = a.apply(look(Direction::Left, Speed::Fast));
        let c = geometry::compute_constraints(a.layout(), a.state());
        assert_eq!(a.state().gaze, Vec2::new(c.min_x as f32, 0.0));

        let (base_left, base_right) = geometry::base_sizes(a.layout(), a.state());
        let (left, right) = geometry::eye_sizes(a.layout(), a.state());
        assert!(left.width > base_left.width);
        assert!(right.width < base_right.width);
        let cap = (0.4 * base_left.width as f32) as i32;
        assert!(left.width - base_left.width <= cap);
        assert!(base_right.width - right.width <= cap);
    }

    #[test]
    fn commands_run_in_submission_order() {
        let mut a = animator();
        a.enqueue(FaceCommand::SetCurious { curious: true });
        a.enqueue(FaceCommand::SetCurious { curious: false });
        assert_eq!(
            a.tick(),
            TickOutcome::Completed(FaceCommand::SetCurious { curious: true })
        );
        assert!(a.state().curious);
        assert_eq!(
            a.tick(),
            TickOutcome::Completed(FaceCommand::SetCurious { curious: false })
        );
        assert_eq!(a.tick(), TickOutcome::Idle);
    }

    #[test]
    fn cancel_drops_active_and_queued() {
        let mut a = animator();
        a.enqueue(look(Direction::Left, Speed::Slow));
        a.enqueue(look(Direction::Right, Speed::Slow));
        let _ = a.tick();
        let gaze = a.state().gaze;
        assert_eq!(a.cancel(), 2);
        assert!(a.is_idle());
        assert_eq!(a.tick(), TickOutcome::Idle);
        assert_eq!(a.state().gaze, gaze);
    }
}
