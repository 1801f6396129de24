//! Scripted command sequences.
//!
//! A script is a TOML file of `[[step]]` tables. Each step is either a
//! command (selected by its `command` key, see
//! [`FaceCommand`](crate::animation::FaceCommand)) or a pause:
//!
//! ```toml
//! [[step]]
//! command = "set_curious"
//! curious = true
//!
//! [[step]]
//! pause_ms = 2000
//!
//! [[step]]
//! command = "look"
//! direction = "TR"
//! speed = "fast"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{
    Direction, Expression, EyeSelector, FaceCommand, Speed,
};
use crate::engine::FaceHandle;
use crate::error::EyesError;

/// One script entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// Sleep without issuing commands.
    Pause {
        /// Pause length in milliseconds.
        pause_ms: u64,
    },
    /// Run a command to completion.
    Command(FaceCommand),
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Steps in execution order.
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse a script from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::OptionsParse`] for malformed scripts.
    pub fn from_toml_str(content: &str) -> Result<Self, EyesError> {
        toml::from_str(content)
            .map_err(|e| EyesError::OptionsParse(e.to_string()))
    }

    /// Load a script file.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::Io`] if the file cannot be read, or
    /// [`EyesError::OptionsParse`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self, EyesError> {
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_toml_str(&content)?;
        log::info!(
            "loaded script {} ({} steps)",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::OptionsParse`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, EyesError> {
        toml::to_string_pretty(self)
            .map_err(|e| EyesError::OptionsParse(e.to_string()))
    }

    /// The built-in demo: expressions, glances with and without curious
    /// mode, blinks, and closing and opening each eye.
    #[must_use]
    pub fn demo() -> Self {
        use Direction::{
            BottomLeft, Center, Left, Right, Top, TopLeft, TopRight,
        };
        use Speed::{Fast, Medium, Slow};

        let face = |expression| {
            ScriptStep::Command(FaceCommand::ChangeFace { expression })
        };
        let look = |direction, speed| {
            ScriptStep::Command(FaceCommand::Look { direction, speed })
        };
        let curious = |curious| {
            ScriptStep::Command(FaceCommand::SetCurious { curious })
        };
        let blink = |eye, speed| {
            ScriptStep::Command(FaceCommand::Blink { eye, speed })
        };
        let close = |eye| {
            ScriptStep::Command(FaceCommand::CloseEyes { eye, speed: Medium })
        };
        let open = |eye| {
            ScriptStep::Command(FaceCommand::OpenEyes { eye, speed: Medium })
        };
        let pause = |pause_ms| ScriptStep::Pause { pause_ms };

        let steps = vec![
            face(Expression::Default),
            pause(2_000),
            curious(true),
            pause(2_000),
            look(TopRight, Fast),
            face(Expression::Happy),
            pause(2_000),
            look(BottomLeft, Medium),
            curious(false),
            pause(2_000),
            curious(true),
            face(Expression::Angry),
            curious(false),
            pause(2_000),
            look(Top, Fast),
            blink(EyeSelector::Both, Fast),
            pause(2_000),
            face(Expression::Tired),
            pause(2_000),
            curious(true),
            look(TopLeft, Fast),
            pause(1_000),
            look(Left, Medium),
            pause(1_000),
            look(Right, Slow),
            blink(EyeSelector::Both, Medium),
            pause(1_000),
            curious(false),
            look(Center, Medium),
            face(Expression::Default),
            close(EyeSelector::Left),
            pause(1_000),
            open(EyeSelector::Left),
            close(EyeSelector::Right),
            pause(1_000),
            open(EyeSelector::Right),
            blink(EyeSelector::Left, Fast),
            blink(EyeSelector::Right, Fast),
            pause(2_000),
        ];
        Self { steps }
    }

    /// Execute every step in order, blocking on each command.
    ///
    /// # Errors
    ///
    /// Stops at the first command that fails (cancelled, or engine stopped).
    pub fn run(&self, handle: &FaceHandle) -> Result<(), EyesError> {
        for (index, step) in self.steps.iter().enumerate() {
            match *step {
                ScriptStep::Pause { pause_ms } => {
                    std::thread::sleep(Duration::from_millis(pause_ms));
                }
                ScriptStep::Command(command) => {
                    log::debug!("script step {index}: {}", command.name());
                    handle.execute(command)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FaceEngine;
    use crate::options::Options;
    use crate::sink::{ColorMode, MemorySink};

    #[test]
    fn parses_commands_and_pauses() {
        let script = Script::from_toml_str(
            r#"
            [[step]]
            command = "set_curious"
            curious = true

            [[step]]
            pause_ms = 250

            [[step]]
            command = "look"
            direction = "BL"

            [[step]]
            command = "change_face"
            expression = "tired"
            "#,
        )
        .unwrap();
        assert_eq!(
            script.steps,
            vec![
                ScriptStep::Command(FaceCommand::SetCurious { curious: true }),
                ScriptStep::Pause { pause_ms: 250 },
                ScriptStep::Command(FaceCommand::Look {
                    direction: Direction::BottomLeft,
                    speed: Speed::Medium,
                }),
                ScriptStep::Command(FaceCommand::ChangeFace {
                    expression: Expression::Tired,
                }),
            ]
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = Script::from_toml_str("[[step]]\ncommand = \"wink\"\n");
        assert!(matches!(err, Err(EyesError::OptionsParse(_))));
    }

    #[test]
    fn empty_file_is_an_empty_script() {
        assert_eq!(Script::from_toml_str("").unwrap(), Script::default());
    }

    #[test]
    fn demo_survives_a_toml_round_trip() {
        let demo = Script::demo();
        let text = demo.to_toml_string().unwrap();
        assert_eq!(Script::from_toml_str(&text).unwrap(), demo);
    }

    #[test]
    fn demo_ends_open_and_centered() {
        let mut options = Options::default();
        options.render.fps = 0;
        let sink = MemorySink::new(128, 64, ColorMode::Monochrome);
        let mut handle = FaceEngine::spawn(&options, Box::new(sink)).unwrap();

        let commands_only = Script {
            steps: Script::demo()
                .steps
                .into_iter()
                .filter(|s| matches!(s, ScriptStep::Command(_)))
                .collect(),
        };
        commands_only.run(&handle).unwrap();

        let state = handle.snapshot();
        assert_eq!(state.gaze, glam::Vec2::ZERO);
        assert_eq!(state.eye_height_left, 32);
        assert_eq!(state.eye_height_right, 32);
        assert!(!state.curious);
        handle.shutdown().unwrap();
    }
}
