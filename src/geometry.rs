//! Pure face geometry: movement constraints, curious distortion, eye boxes
//! and eyelid masks.
//!
//! Nothing in here touches pixels. The renderer turns a [`FaceGeometry`]
//! into a frame; the motions use [`compute_constraints`] to pick gaze
//! targets.

use embedded_graphics::prelude::Point;

use crate::animation::{AnimationState, Side};
use crate::options::{EyeOptions, EyeShapeOptions};

/// Smallest width/height an eye is ever drawn with.
pub const MIN_EYE_SIZE: i32 = 2;

/// Largest relative growth/shrink applied by curious mode.
const CURIOUS_MAX_SCALE: f32 = 0.4;

/// Configured shape of one eye, in signed pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeShape {
    /// Base width.
    pub width: i32,
    /// Base (fully open) height.
    pub height: i32,
    /// Corner radius.
    pub roundness: i32,
}

/// Static layout of the face on a particular screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceLayout {
    /// Screen width in pixels.
    pub screen_width: i32,
    /// Screen height in pixels.
    pub screen_height: i32,
    /// Gap between the eyes.
    pub distance: i32,
    /// Left eye base shape.
    pub left: EyeShape,
    /// Right eye base shape.
    pub right: EyeShape,
}

impl FaceLayout {
    /// Layout for `eye` options on a screen of the given size.
    #[must_use]
    pub fn new(eye: &EyeOptions, screen_width: u32, screen_height: u32) -> Self {
        let shape = |o: &EyeShapeOptions| EyeShape {
            width: o.width as i32,
            height: o.height as i32,
            roundness: o.roundness as i32,
        };
        Self {
            screen_width: screen_width as i32,
            screen_height: screen_height as i32,
            distance: eye.distance as i32,
            left: shape(&eye.left),
            right: shape(&eye.right),
        }
    }

    /// Base shape of one eye.
    #[must_use]
    pub const fn shape(&self, side: Side) -> EyeShape {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Range of gaze offsets that keeps both eyes on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    /// Leftmost offset.
    pub min_x: i32,
    /// Rightmost offset.
    pub max_x: i32,
    /// Topmost offset.
    pub min_y: i32,
    /// Bottommost offset.
    pub max_y: i32,
}

/// Width and height of an eye as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeSize {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl EyeSize {
    fn clamped(self) -> Self {
        Self {
            width: self.width.max(MIN_EYE_SIZE),
            height: self.height.max(MIN_EYE_SIZE),
        }
    }
}

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeBox {
    /// Left column.
    pub x0: i32,
    /// Top row.
    pub y0: i32,
    /// Right column (inclusive).
    pub x1: i32,
    /// Bottom row (inclusive).
    pub y1: i32,
}

impl EyeBox {
    /// Number of columns covered.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    /// Number of rows covered.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.y1 - self.y0 + 1
    }

    /// Clip to a `width` x `height` screen, keeping at least
    /// [`MIN_EYE_SIZE`] pixels on each axis.
    #[must_use]
    pub fn clipped(self, width: i32, height: i32) -> Self {
        let (x0, x1) = clip_span(self.x0, self.x1, width);
        let (y0, y1) = clip_span(self.y0, self.y1, height);
        Self { x0, y0, x1, y1 }
    }
}

fn clip_span(start: i32, end: i32, extent: i32) -> (i32, i32) {
    let last = (extent - 1).max(0);
    let mut start = start.clamp(0, last);
    let mut end = end.clamp(0, last);
    if end - start + 1 < MIN_EYE_SIZE {
        if start + MIN_EYE_SIZE - 1 <= last {
            end = start + MIN_EYE_SIZE - 1;
        } else {
            start = (end - MIN_EYE_SIZE + 1).max(0);
        }
    }
    (start, end)
}

/// Everything needed to draw one eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeGeometry {
    /// Eye rectangle, clipped to the screen.
    pub bounds: EyeBox,
    /// Corner radius for the eye and the bottom lid.
    pub radius: i32,
    /// Top lid quadrilateral, clockwise from the top-left corner.
    pub top_lid: Option<[Point; 4]>,
    /// Bottom lid strip.
    pub bottom_lid: Option<EyeBox>,
}

/// Geometry of both eyes for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGeometry {
    /// Left eye.
    pub left: EyeGeometry,
    /// Right eye.
    pub right: EyeGeometry,
}

const fn inflate(value: i32) -> i32 {
    value * 6 / 5
}

/// Gaze offset limits for the current state.
///
/// With `curious` set, base sizes are inflated by 20% first, so the larger
/// eyes still fit.
#[must_use]
pub fn compute_constraints(
    layout: &FaceLayout,
    state: &AnimationState,
) -> Constraints {
    let (mut wl, mut wr) = (layout.left.width, layout.right.width);
    let (mut hl, mut hr) = (layout.left.height, layout.right.height);
    if state.curious {
        wl = inflate(wl);
        wr = inflate(wr);
        hl = inflate(hl);
        hr = inflate(hr);
    }
    let half_width = layout.screen_width / 2;
    let half_height = layout.screen_height / 2;
    let half_distance = layout.distance / 2;
    Constraints {
        min_x: -(half_width - wl - half_distance),
        max_x: half_width - wr - half_distance,
        min_y: -(half_height - hl / 2),
        max_y: half_height - hr / 2,
    }
}

/// Sizes before curious distortion: configured widths and current heights,
/// inflated by 20% in curious mode.
#[must_use]
pub fn base_sizes(
    layout: &FaceLayout,
    state: &AnimationState,
) -> (EyeSize, EyeSize) {
    let size = |side: Side| {
        let width = layout.shape(side).width;
        let height = state.eye_height(side);
        if state.curious {
            EyeSize {
                width: inflate(width),
                height: inflate(height),
            }
        } else {
            EyeSize { width, height }
        }
    };
    (size(Side::Left), size(Side::Right))
}

/// Grow the eye on the gaze side and shrink the other one.
///
/// The scale is proportional to `|gaze.x| / (screen_width / 2)` and capped
/// at 40%. Without curious mode or horizontal gaze the sizes are only
/// clamped.
#[must_use]
pub fn apply_curious_distortion(
    layout: &FaceLayout,
    state: &AnimationState,
    left: EyeSize,
    right: EyeSize,
) -> (EyeSize, EyeSize) {
    let offset = state.gaze.x;
    if !state.curious || offset == 0.0 {
        return (left.clamped(), right.clamped());
    }
    let half_width = (layout.screen_width / 2).max(1) as f32;
    let factor =
        (CURIOUS_MAX_SCALE / half_width * offset.abs()).min(CURIOUS_MAX_SCALE);
    let delta = |v: i32| (factor * v as f32) as i32;
    let (grow, shrink) = if offset < 0.0 {
        (left, right)
    } else {
        (right, left)
    };
    let grown = EyeSize {
        width: grow.width + delta(grow.width),
        height: grow.height + delta(grow.height),
    };
    let shrunk = EyeSize {
        width: shrink.width - delta(shrink.width),
        height: shrink.height - delta(shrink.height),
    };
    if offset < 0.0 {
        (grown.clamped(), shrunk.clamped())
    } else {
        (shrunk.clamped(), grown.clamped())
    }
}

/// Drawn sizes of both eyes.
#[must_use]
pub fn eye_sizes(
    layout: &FaceLayout,
    state: &AnimationState,
) -> (EyeSize, EyeSize) {
    let (left, right) = base_sizes(layout, state);
    apply_curious_distortion(layout, state, left, right)
}

fn raw_boxes(
    layout: &FaceLayout,
    state: &AnimationState,
    left: EyeSize,
    right: EyeSize,
) -> (EyeBox, EyeBox) {
    let cx = layout.screen_width / 2;
    let cy = layout.screen_height / 2;
    let half_distance = layout.distance / 2;
    let ox = state.gaze.x.round() as i32;
    let oy = state.gaze.y.round() as i32;
    let left_box = EyeBox {
        x0: cx - left.width - half_distance + ox,
        y0: cy - left.height / 2 + oy,
        x1: cx - half_distance + ox,
        y1: cy + left.height / 2 + oy,
    };
    let right_box = EyeBox {
        x0: cx + half_distance + ox,
        y0: cy - right.height / 2 + oy,
        x1: cx + right.width + half_distance + ox,
        y1: cy + right.height / 2 + oy,
    };
    (left_box, right_box)
}

/// Eye rectangles clipped to the screen.
#[must_use]
pub fn eye_boxes(
    layout: &FaceLayout,
    state: &AnimationState,
) -> (EyeBox, EyeBox) {
    let (left, right) = eye_sizes(layout, state);
    let (l, r) = raw_boxes(layout, state, left, right);
    (
        l.clipped(layout.screen_width, layout.screen_height),
        r.clipped(layout.screen_width, layout.screen_height),
    )
}

/// Scale a stored lid depth to the drawn eye height, capped at half of it.
fn mask_depth(lid: i32, drawn_height: i32, state_height: i32) -> i32 {
    if lid <= 0 {
        return 0;
    }
    let scaled = lid * drawn_height / state_height.max(MIN_EYE_SIZE);
    scaled.min(drawn_height / 2)
}

fn eye_geometry(
    side: Side,
    layout: &FaceLayout,
    state: &AnimationState,
    size: EyeSize,
    bounds: EyeBox,
) -> EyeGeometry {
    let (inner, outer, bottom) = state.eyelids.of(side);
    let state_height = state.eye_height(side);
    let inner = mask_depth(inner, size.height, state_height);
    let outer = mask_depth(outer, size.height, state_height);
    let bottom = mask_depth(bottom, size.height, state_height);

    // The outer corner of the left eye is on its left edge; mirrored for
    // the right eye.
    let (left_edge, right_edge) = match side {
        Side::Left => (outer, inner),
        Side::Right => (inner, outer),
    };
    let top_lid = (inner > 0 || outer > 0).then(|| {
        [
            Point::new(bounds.x0, bounds.y0),
            Point::new(bounds.x1, bounds.y0),
            Point::new(bounds.x1, bounds.y0 + right_edge),
            Point::new(bounds.x0, bounds.y0 + left_edge),
        ]
    });
    let bottom_lid = (bottom > 0).then(|| EyeBox {
        x0: bounds.x0,
        y0: bounds.y1 - bottom,
        x1: bounds.x1,
        y1: bounds.y1,
    });

    EyeGeometry {
        bounds,
        radius: layout.shape(side).roundness,
        top_lid,
        bottom_lid,
    }
}

/// Full geometry for one frame.
#[must_use]
pub fn compose(layout: &FaceLayout, state: &AnimationState) -> FaceGeometry {
    let (left_size, right_size) = eye_sizes(layout, state);
    let (left_box, right_box) =
        raw_boxes(layout, state, left_size, right_size);
    let (w, h) = (layout.screen_width, layout.screen_height);
    FaceGeometry {
        left: eye_geometry(
            Side::Left,
            layout,
            state,
            left_size,
            left_box.clipped(w, h),
        ),
        right: eye_geometry(
            Side::Right,
            layout,
            state,
            right_size,
            right_box.clipped(w, h),
        ),
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::animation::{EyelidHeights, Expression};
    use crate::options::{EyeOptions, RenderOptions};

    fn layout() -> FaceLayout {
        FaceLayout::new(&EyeOptions::default(), 128, 64)
    }

    fn state() -> AnimationState {
        AnimationState::new(&layout(), &RenderOptions::default())
    }

    #[test]
    fn constraints_for_default_face() {
        let c = compute_constraints(&layout(), &state());
        assert_eq!(
            c,
            Constraints {
                min_x: -27,
                max_x: 27,
                min_y: -16,
                max_y: 16
            }
        );
    }

    #[test]
    fn curious_constraints_use_inflated_eyes() {
        let mut s = state();
        s.curious = true;
        let c = compute_constraints(&layout(), &s);
        // 32 * 1.2 = 38
        assert_eq!(c.max_x, 64 - 38 - 5);
        assert_eq!(c.min_x, -(64 - 38 - 5));
        assert_eq!(c.min_y, -(32 - 19));
    }

    #[test]
    fn constraints_bracket_zero_for_small_eyes() {
        for width in [2, 8, 20, 31] {
            for height in [2, 10, 31] {
                for distance in [0, 4, 10] {
                    let mut opts = EyeOptions::default();
                    opts.distance = distance;
                    opts.left.width = width;
                    opts.right.width = width;
                    opts.left.height = height;
                    opts.right.height = height;
                    let layout = FaceLayout::new(&opts, 128, 64);
                    for curious in [false, true] {
                        let mut s =
                            AnimationState::new(&layout, &RenderOptions::default());
                        s.curious = curious;
                        let c = compute_constraints(&layout, &s);
                        assert!(c.min_x <= 0 && 0 <= c.max_x, "{c:?}");
                        assert!(c.min_y <= 0 && 0 <= c.max_y, "{c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn boxes_stay_on_screen_across_the_constraint_range() {
        let layout = layout();
        for curious in [false, true] {
            let mut s = state();
            s.curious = curious;
            let c = compute_constraints(&layout, &s);
            for x in c.min_x..=c.max_x {
                for y in c.min_y..=c.max_y {
                    s.gaze = Vec2::new(x as f32, y as f32);
                    let (l, r) = eye_boxes(&layout, &s);
                    for b in [l, r] {
                        assert!(b.width() >= MIN_EYE_SIZE, "{b:?}");
                        assert!(b.height() >= MIN_EYE_SIZE, "{b:?}");
                        assert!(b.x0 >= 0 && b.y0 >= 0, "{b:?}");
                        assert!(b.x1 < 128 && b.y1 < 64, "{b:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn centered_boxes_match_layout() {
        let (l, r) = eye_boxes(&layout(), &state());
        assert_eq!(
            l,
            EyeBox {
                x0: 27,
                y0: 16,
                x1: 59,
                y1: 48
            }
        );
        assert_eq!(
            r,
            EyeBox {
                x0: 69,
                y0: 16,
                x1: 101,
                y1: 48
            }
        );
    }

    #[test]
    fn curious_glance_left_grows_left_eye() {
        let layout = layout();
        let mut s = state();
        s.curious = true;
        let (base_l, base_r) = base_sizes(&layout, &s);
        assert_eq!(base_l.width, 38);

        s.gaze = Vec2::new(-21.0, 0.0);
        let (l, r) = eye_sizes(&layout, &s);
        assert!(l.width > base_l.width);
        assert!(r.width < base_r.width);
        assert!(l.height > base_l.height);
        assert!(r.height < base_r.height);
        let cap = (0.4 * base_l.width as f32) as i32;
        assert!(l.width - base_l.width <= cap);
        assert!(base_r.width - r.width <= cap);
    }

    #[test]
    fn distortion_is_capped_and_clamped() {
        let layout = layout();
        let mut s = state();
        s.curious = true;
        s.gaze = Vec2::new(500.0, 0.0);
        let (base_l, base_r) = base_sizes(&layout, &s);
        let (l, r) = eye_sizes(&layout, &s);
        assert_eq!(r.width, base_r.width + (0.4 * base_r.width as f32) as i32);
        assert_eq!(l.width, base_l.width - (0.4 * base_l.width as f32) as i32);

        s.eye_height_left = 1;
        let (l, _) = eye_sizes(&layout, &s);
        assert_eq!(l.height, MIN_EYE_SIZE);
    }

    #[test]
    fn no_distortion_without_curious() {
        let layout = layout();
        let mut s = state();
        s.gaze = Vec2::new(-20.0, 3.0);
        let (l, r) = eye_sizes(&layout, &s);
        assert_eq!((l.width, l.height), (32, 32));
        assert_eq!((r.width, r.height), (32, 32));
    }

    #[test]
    fn angry_lids_slope_toward_the_nose() {
        let layout = layout();
        let mut s = state();
        s.expression = Expression::Angry;
        s.eyelids = EyelidHeights::for_expression(Expression::Angry, 32, 32);
        let face = compose(&layout, &s);

        let left = face.left.top_lid.unwrap();
        // outer (left) edge stays at the top, inner edge drops 16px
        assert_eq!(left[3].y, face.left.bounds.y0);
        assert_eq!(left[2].y, face.left.bounds.y0 + 16);

        let right = face.right.top_lid.unwrap();
        assert_eq!(right[3].y, face.right.bounds.y0 + 16);
        assert_eq!(right[2].y, face.right.bounds.y0);
        assert!(face.left.bottom_lid.is_none());
    }

    #[test]
    fn lid_masks_never_exceed_half_the_eye() {
        let layout = layout();
        let mut s = state();
        s.eyelids = EyelidHeights::for_expression(Expression::Happy, 32, 32);
        s.eye_height_left = 2;
        s.eye_height_right = 6;
        let face = compose(&layout, &s);
        let bottom = face.left.bottom_lid.unwrap();
        assert!(bottom.height() - 1 <= MIN_EYE_SIZE / 2);
        let bottom = face.right.bottom_lid.unwrap();
        assert!(bottom.height() - 1 <= 3);
    }
}
