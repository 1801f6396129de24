//! Random "alive" behavior for a face with nothing else to do.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::command::{Direction, FaceCommand, Speed};
use super::state::EyeSelector;
use crate::engine::FaceHandle;
use crate::error::EyesError;
use crate::options::IdleOptions;

/// One step of the idle sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleAction {
    /// Run a command to completion.
    Command(FaceCommand),
    /// Hold still.
    Pause(Duration),
}

/// Endless generator of glances, blinks and pauses.
///
/// Actions alternate: every command is followed by a pause. With a fixed
/// `seed` the sequence is reproducible.
#[derive(Debug, Clone)]
pub struct IdleBehavior {
    rng: StdRng,
    min_pause_ms: u64,
    max_pause_ms: u64,
    blink_chance: f64,
    pause_next: bool,
}

impl IdleBehavior {
    /// Behavior configured from `[idle]`.
    #[must_use]
    pub fn new(options: &IdleOptions) -> Self {
        let rng = options.seed.map_or_else(
            || StdRng::from_rng(&mut rand::rng()),
            StdRng::seed_from_u64,
        );
        Self {
            rng,
            min_pause_ms: options.min_pause_ms.min(options.max_pause_ms),
            max_pause_ms: options.max_pause_ms.max(options.min_pause_ms),
            blink_chance: f64::from(options.blink_chance).clamp(0.0, 1.0),
            pause_next: false,
        }
    }

    fn random_speed(&mut self) -> Speed {
        match self.rng.random_range(0..3) {
            0 => Speed::Slow,
            1 => Speed::Medium,
            _ => Speed::Fast,
        }
    }

    /// Next action in the sequence.
    pub fn next_action(&mut self) -> IdleAction {
        if self.pause_next {
            self.pause_next = false;
            let ms =
                self.rng.random_range(self.min_pause_ms..=self.max_pause_ms);
            return IdleAction::Pause(Duration::from_millis(ms));
        }
        self.pause_next = true;

        if self.rng.random_bool(self.blink_chance) {
            let speed = if self.rng.random_bool(0.5) {
                Speed::Fast
            } else {
                Speed::Medium
            };
            return IdleAction::Command(FaceCommand::Blink {
                eye: EyeSelector::Both,
                speed,
            });
        }
        let direction =
            Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
        IdleAction::Command(FaceCommand::Look {
            direction,
            speed: self.random_speed(),
        })
    }

    /// Drive `handle` until the engine stops.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the engine, or
    /// [`EyesError::Cancelled`] if a command was cancelled.
    pub fn run(&mut self, handle: &FaceHandle) -> Result<(), EyesError> {
        log::info!("idle behavior started");
        loop {
            match self.next_action() {
                IdleAction::Command(command) => handle.execute(command)?,
                IdleAction::Pause(duration) => std::thread::sleep(duration),
            }
        }
    }
}

impl Iterator for IdleBehavior {
    type Item = IdleAction;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(seed: u64) -> IdleOptions {
        IdleOptions {
            enabled: true,
            min_pause_ms: 100,
            max_pause_ms: 200,
            blink_chance: 0.3,
            seed: Some(seed),
        }
    }

    #[test]
    fn seeded_sequences_repeat() {
        let a: Vec<_> = IdleBehavior::new(&options(7)).take(40).collect();
        let b: Vec<_> = IdleBehavior::new(&options(7)).take(40).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn commands_and_pauses_alternate() {
        for (i, action) in IdleBehavior::new(&options(1)).take(50).enumerate() {
            match action {
                IdleAction::Command(_) => assert_eq!(i % 2, 0),
                IdleAction::Pause(d) => {
                    assert_eq!(i % 2, 1);
                    assert!((100..=200).contains(&d.as_millis()));
                }
            }
        }
    }

    #[test]
    fn blink_chance_bounds() {
        let mut never = options(3);
        never.blink_chance = 0.0;
        assert!(IdleBehavior::new(&never).take(60).all(|a| !matches!(
            a,
            IdleAction::Command(FaceCommand::Blink { .. })
        )));

        let mut always = options(3);
        always.blink_chance = 1.0;
        assert!(IdleBehavior::new(&always).step_by(2).take(30).all(|a| {
            matches!(a, IdleAction::Command(FaceCommand::Blink { .. }))
        }));
    }
}
