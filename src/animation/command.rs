//! The face's complete command vocabulary.
//!
//! Every operation a caller can ask of the face, whether it comes from a
//! [`FaceHandle`](crate::engine::FaceHandle) method, a script step, or the
//! idle behavior, is a `FaceCommand`. Commands are executed one at a time,
//! in submission order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Expression, EyeSelector};
use crate::geometry::Constraints;
use crate::options::Color;

// ── Command payload types ────────────────────────────────────────────────

/// Where to look, relative to the movement constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Center.
    #[serde(rename = "C")]
    Center,
    /// Left.
    #[serde(rename = "L")]
    Left,
    /// Right.
    #[serde(rename = "R")]
    Right,
    /// Top.
    #[serde(rename = "T")]
    Top,
    /// Bottom.
    #[serde(rename = "B")]
    Bottom,
    /// Top left.
    #[serde(rename = "TL")]
    TopLeft,
    /// Top right.
    #[serde(rename = "TR")]
    TopRight,
    /// Bottom left.
    #[serde(rename = "BL")]
    BottomLeft,
    /// Bottom right.
    #[serde(rename = "BR")]
    BottomRight,
}

impl Direction {
    /// All nine directions.
    pub const ALL: [Self; 9] = [
        Self::Center,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Gaze offset this direction maps to.
    #[must_use]
    pub fn target(self, c: &Constraints) -> Vec2 {
        let (x, y) = match self {
            Self::Center => (0, 0),
            Self::Left => (c.min_x, 0),
            Self::Right => (c.max_x, 0),
            Self::Top => (0, c.min_y),
            Self::Bottom => (0, c.max_y),
            Self::TopLeft => (c.min_x, c.min_y),
            Self::TopRight => (c.max_x, c.min_y),
            Self::BottomLeft => (c.min_x, c.max_y),
            Self::BottomRight => (c.max_x, c.max_y),
        };
        Vec2::new(x as f32, y as f32)
    }
}

/// How fast a motion converges.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    /// Slow.
    Slow,
    /// Medium.
    #[default]
    Medium,
    /// Fast.
    Fast,
}

impl Speed {
    /// Gaze step per tick, in pixels.
    #[must_use]
    pub const fn look_step(self) -> f32 {
        match self {
            Self::Slow => 0.5,
            Self::Medium => 1.0,
            Self::Fast => 2.0,
        }
    }

    /// Eye height step per tick, in pixels.
    #[must_use]
    pub const fn lid_step(self) -> i32 {
        match self {
            Self::Slow => 1,
            Self::Medium => 2,
            Self::Fast => 4,
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────────

/// A single face operation.
///
/// In TOML scripts the variant is selected by the `command` key:
///
/// ```toml
/// [[step]]
/// command = "look"
/// direction = "TR"
/// speed = "fast"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum FaceCommand {
    /// Ease the eyelids into an expression.
    ChangeFace {
        /// Target expression.
        expression: Expression,
    },

    /// Move the gaze.
    Look {
        /// Target direction.
        direction: Direction,
        /// Step size.
        #[serde(default)]
        speed: Speed,
    },

    /// Shrink eye heights to the minimum.
    CloseEyes {
        /// Which eyes.
        #[serde(default)]
        eye: EyeSelector,
        /// Step size.
        #[serde(default)]
        speed: Speed,
    },

    /// Restore eye heights to their configured size.
    OpenEyes {
        /// Which eyes.
        #[serde(default)]
        eye: EyeSelector,
        /// Step size.
        #[serde(default)]
        speed: Speed,
    },

    /// Close then reopen.
    Blink {
        /// Which eyes.
        #[serde(default)]
        eye: EyeSelector,
        /// Step size.
        #[serde(default)]
        speed: Speed,
    },

    /// Toggle gaze-dependent eye scaling.
    SetCurious {
        /// New flag value.
        curious: bool,
    },

    /// Replace the fill colors.
    SetColors {
        /// Background fill.
        background: Color,
        /// Eye fill.
        eye: Color,
    },
}

impl FaceCommand {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChangeFace { .. } => "change_face",
            Self::Look { .. } => "look",
            Self::CloseEyes { .. } => "close_eyes",
            Self::OpenEyes { .. } => "open_eyes",
            Self::Blink { .. } => "blink",
            Self::SetCurious { .. } => "set_curious",
            Self::SetColors { .. } => "set_colors",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        step: Vec<FaceCommand>,
    }

    #[test]
    fn commands_parse_from_toml_tables() {
        let parsed: Wrapper = toml::from_str(
            r##"
            [[step]]
            command = "look"
            direction = "TR"
            speed = "fast"

            [[step]]
            command = "close_eyes"
            eye = "left"

            [[step]]
            command = "set_colors"
            background = "#000010"
            eye = "cyan"
            "##,
        )
        .unwrap();
        assert_eq!(
            parsed.step,
            vec![
                FaceCommand::Look {
                    direction: Direction::TopRight,
                    speed: Speed::Fast,
                },
                FaceCommand::CloseEyes {
                    eye: EyeSelector::Left,
                    speed: Speed::Medium,
                },
                FaceCommand::SetColors {
                    background: Color::new(0, 0, 0x10),
                    eye: Color::new(0, 255, 255),
                },
            ]
        );
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let parsed: Result<Wrapper, _> = toml::from_str(
            "[[step]]\ncommand = \"look\"\ndirection = \"up\"\n",
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn directions_map_onto_constraints() {
        let c = Constraints {
            min_x: -27,
            max_x: 27,
            min_y: -16,
            max_y: 16,
        };
        assert_eq!(Direction::TopRight.target(&c), Vec2::new(27.0, -16.0));
        assert_eq!(Direction::BottomLeft.target(&c), Vec2::new(-27.0, 16.0));
        assert_eq!(Direction::Center.target(&c), Vec2::ZERO);
    }
}
