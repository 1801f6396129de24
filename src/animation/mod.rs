//! Face animation: state, commands, and the per-tick motions that carry
//! commands out.

mod animator;
pub mod command;
mod idle;
pub mod motions;
mod state;

pub use animator::{FaceAnimator, TickOutcome};
pub use command::{Direction, FaceCommand, Speed};
pub use idle::{IdleAction, IdleBehavior};
pub use state::{
    AnimationState, ClosedState, Expression, EyeSelector, EyelidHeights, Side,
};
