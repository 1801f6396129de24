//! Motions turn commands into per-tick convergence steps.
//!
//! Each [`FaceCommand`] becomes one [`Motion`]. The animator calls
//! [`Motion::step`] once per render tick; the motion reads the live state,
//! moves it a fixed amount toward its targets and reports whether it has
//! arrived. Targets are resolved on the first step, so a motion always
//! starts from whatever the previous command left behind.

mod eyelids;
mod gaze;
mod instant;
mod lids;
mod sequence;
mod traits;

pub use eyelids::ExpressionMotion;
pub use gaze::GazeMotion;
pub use instant::InstantMotion;
pub use lids::{LidAction, LidMotion};
pub use sequence::Sequence;
pub use traits::{Motion, Progress};

use super::command::FaceCommand;

/// Build the motion that executes `command`.
#[must_use]
pub fn motion_for(command: FaceCommand) -> Box<dyn Motion> {
    match command {
        FaceCommand::ChangeFace { expression } => {
            Box::new(ExpressionMotion::new(expression))
        }
        FaceCommand::Look { direction, speed } => {
            Box::new(GazeMotion::new(direction, speed))
        }
        FaceCommand::CloseEyes { eye, speed } => {
            Box::new(LidMotion::new(LidAction::Close, eye, speed))
        }
        FaceCommand::OpenEyes { eye, speed } => {
            Box::new(LidMotion::new(LidAction::Open, eye, speed))
        }
        FaceCommand::Blink { eye, speed } => Box::new(Sequence::new(
            "blink",
            vec![
                Box::new(LidMotion::new(LidAction::Close, eye, speed)),
                Box::new(LidMotion::new(LidAction::Open, eye, speed)),
            ],
        )),
        FaceCommand::SetCurious { curious } => {
            Box::new(InstantMotion::Curious(curious))
        }
        FaceCommand::SetColors { background, eye } => {
            Box::new(InstantMotion::Colors { background, eye })
        }
    }
}
