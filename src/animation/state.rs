//! The mutable face snapshot read by the renderer and written by motions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::FaceLayout;
use crate::options::{Color, RenderOptions};

/// Facial expression, realized through eyelid masks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// No eyelids.
    #[default]
    Default,
    /// Bottom lids raised.
    Happy,
    /// Inner top lids lowered.
    Angry,
    /// Outer top lids lowered.
    Tired,
}

/// One of the two eyes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The eye drawn on the left of the screen.
    Left,
    /// The eye drawn on the right of the screen.
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];
}

/// Which eye(s) a command applies to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EyeSelector {
    /// Left eye only.
    Left,
    /// Right eye only.
    Right,
    /// Both eyes.
    #[default]
    Both,
}

impl EyeSelector {
    /// Whether `side` is part of the selection.
    #[must_use]
    pub const fn includes(self, side: Side) -> bool {
        matches!(
            (self, side),
            (Self::Both, _) | (Self::Left, Side::Left) | (Self::Right, Side::Right)
        )
    }
}

/// Which eyes are fully closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClosedState {
    /// Both eyes open.
    #[default]
    None,
    /// Left eye closed.
    Left,
    /// Right eye closed.
    Right,
    /// Both eyes closed.
    Both,
}

impl ClosedState {
    const fn from_flags(left: bool, right: bool) -> Self {
        match (left, right) {
            (false, false) => Self::None,
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            (true, true) => Self::Both,
        }
    }

    /// Whether the eye on `side` is closed.
    #[must_use]
    pub const fn is_closed(self, side: Side) -> bool {
        matches!(
            (self, side),
            (Self::Both, _) | (Self::Left, Side::Left) | (Self::Right, Side::Right)
        )
    }

    /// Whether every selected eye is already closed.
    #[must_use]
    pub const fn covers(self, eyes: EyeSelector) -> bool {
        (!eyes.includes(Side::Left) || self.is_closed(Side::Left))
            && (!eyes.includes(Side::Right) || self.is_closed(Side::Right))
    }

    /// State after additionally closing `eyes`.
    #[must_use]
    pub const fn union(self, eyes: EyeSelector) -> Self {
        Self::from_flags(
            self.is_closed(Side::Left) || eyes.includes(Side::Left),
            self.is_closed(Side::Right) || eyes.includes(Side::Right),
        )
    }

    /// State after opening `eyes`.
    #[must_use]
    pub const fn without(self, eyes: EyeSelector) -> Self {
        Self::from_flags(
            self.is_closed(Side::Left) && !eyes.includes(Side::Left),
            self.is_closed(Side::Right) && !eyes.includes(Side::Right),
        )
    }
}

/// Depths of the six eyelid masks, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EyelidHeights {
    /// Top lid, inner (nose) corner of the left eye.
    pub top_inner_left: i32,
    /// Top lid, outer corner of the left eye.
    pub top_outer_left: i32,
    /// Bottom lid of the left eye.
    pub bottom_left: i32,
    /// Top lid, inner (nose) corner of the right eye.
    pub top_inner_right: i32,
    /// Top lid, outer corner of the right eye.
    pub top_outer_right: i32,
    /// Bottom lid of the right eye.
    pub bottom_right: i32,
}

impl EyelidHeights {
    /// All lids retracted.
    pub const ZERO: Self = Self::from_array([0; 6]);

    /// Lids in declaration order.
    #[must_use]
    pub const fn to_array(self) -> [i32; 6] {
        [
            self.top_inner_left,
            self.top_outer_left,
            self.bottom_left,
            self.top_inner_right,
            self.top_outer_right,
            self.bottom_right,
        ]
    }

    /// Inverse of [`to_array`](Self::to_array).
    #[must_use]
    pub const fn from_array(values: [i32; 6]) -> Self {
        Self {
            top_inner_left: values[0],
            top_outer_left: values[1],
            bottom_left: values[2],
            top_inner_right: values[3],
            top_outer_right: values[4],
            bottom_right: values[5],
        }
    }

    /// Target lids for `expression`, given the current eye heights.
    #[must_use]
    pub const fn for_expression(
        expression: Expression,
        left_height: i32,
        right_height: i32,
    ) -> Self {
        let (l, r) = (left_height / 2, right_height / 2);
        match expression {
            Expression::Default => Self::ZERO,
            Expression::Happy => Self {
                bottom_left: l,
                bottom_right: r,
                ..Self::ZERO
            },
            Expression::Angry => Self {
                top_inner_left: l,
                top_inner_right: r,
                ..Self::ZERO
            },
            Expression::Tired => Self {
                top_outer_left: l,
                top_outer_right: r,
                ..Self::ZERO
            },
        }
    }

    /// `(top_inner, top_outer, bottom)` of one eye.
    #[must_use]
    pub const fn of(self, side: Side) -> (i32, i32, i32) {
        match side {
            Side::Left => {
                (self.top_inner_left, self.top_outer_left, self.bottom_left)
            }
            Side::Right => (
                self.top_inner_right,
                self.top_outer_right,
                self.bottom_right,
            ),
        }
    }
}

/// Everything the renderer needs to draw one frame.
///
/// Created once with the eyes open and owned by the
/// [`FaceAnimator`](super::FaceAnimator), which is its only writer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Background fill (ignored on monochrome sinks).
    pub background_color: Color,
    /// Eye fill (ignored on monochrome sinks).
    pub eye_color: Color,
    /// Current expression.
    pub expression: Expression,
    /// Whether gaze distorts the eye sizes.
    pub curious: bool,
    /// Which eyes are fully closed.
    pub closed: ClosedState,
    /// Displacement of both eyes from the screen center.
    pub gaze: Vec2,
    /// Eyelid mask depths.
    pub eyelids: EyelidHeights,
    /// Current left eye height.
    pub eye_height_left: i32,
    /// Current right eye height.
    pub eye_height_right: i32,
}

impl AnimationState {
    /// Open, centered, default-expression face.
    #[must_use]
    pub fn new(layout: &FaceLayout, render: &RenderOptions) -> Self {
        Self {
            background_color: render.background_color,
            eye_color: render.eye_color,
            expression: Expression::Default,
            curious: false,
            closed: ClosedState::None,
            gaze: Vec2::ZERO,
            eyelids: EyelidHeights::ZERO,
            eye_height_left: layout.left.height,
            eye_height_right: layout.right.height,
        }
    }

    /// Current height of one eye.
    #[must_use]
    pub const fn eye_height(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.eye_height_left,
            Side::Right => self.eye_height_right,
        }
    }

    /// Set the current height of one eye.
    pub fn set_eye_height(&mut self, side: Side, height: i32) {
        match side {
            Side::Left => self.eye_height_left = height,
            Side::Right => self.eye_height_right = height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_combines_with_already_closed_eye() {
        assert_eq!(
            ClosedState::Right.union(EyeSelector::Left),
            ClosedState::Both
        );
        assert_eq!(
            ClosedState::None.union(EyeSelector::Right),
            ClosedState::Right
        );
        assert_eq!(
            ClosedState::Left.union(EyeSelector::Both),
            ClosedState::Both
        );
    }

    #[test]
    fn opening_leaves_the_other_eye_closed() {
        assert_eq!(
            ClosedState::Both.without(EyeSelector::Left),
            ClosedState::Right
        );
        assert_eq!(
            ClosedState::Left.without(EyeSelector::Right),
            ClosedState::Left
        );
        assert_eq!(
            ClosedState::Both.without(EyeSelector::Both),
            ClosedState::None
        );
    }

    #[test]
    fn covers_requires_every_selected_eye() {
        assert!(ClosedState::Both.covers(EyeSelector::Left));
        assert!(!ClosedState::Left.covers(EyeSelector::Both));
        assert!(!ClosedState::None.covers(EyeSelector::Right));
    }

    #[test]
    fn expression_table_uses_half_heights() {
        let happy = EyelidHeights::for_expression(Expression::Happy, 32, 20);
        assert_eq!(happy.of(Side::Left), (0, 0, 16));
        assert_eq!(happy.of(Side::Right), (0, 0, 10));

        let angry = EyelidHeights::for_expression(Expression::Angry, 32, 32);
        assert_eq!(angry.of(Side::Left), (16, 0, 0));

        let tired = EyelidHeights::for_expression(Expression::Tired, 32, 32);
        assert_eq!(tired.of(Side::Right), (0, 16, 0));

        assert_eq!(
            EyelidHeights::for_expression(Expression::Default, 32, 32),
            EyelidHeights::ZERO
        );
    }
}
