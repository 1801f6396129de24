//! CPU rasterizer that turns an [`AnimationState`] into a [`Frame`].
//!
//! Drawing goes through `embedded-graphics` primitives: one filled rounded
//! rectangle per eye, then background-colored masks for the eyelids.

mod frame;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{Point, Primitive, Size};
use embedded_graphics::primitives::{
    PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
};
use embedded_graphics::Drawable;
pub use frame::Frame;

use crate::animation::AnimationState;
use crate::geometry::{self, EyeBox, EyeGeometry, FaceLayout};
use crate::sink::ColorMode;

/// Draws face states into a reusable frame buffer.
#[derive(Debug, Clone)]
pub struct FaceRenderer {
    layout: FaceLayout,
    mode: ColorMode,
    frame: Frame,
}

impl FaceRenderer {
    /// Renderer for a `layout` shown on a sink with the given color mode.
    #[must_use]
    pub fn new(layout: FaceLayout, mode: ColorMode) -> Self {
        let width = u32::try_from(layout.screen_width).unwrap_or(0);
        let height = u32::try_from(layout.screen_height).unwrap_or(0);
        Self {
            layout,
            mode,
            frame: Frame::new(width, height, Rgb888::BLACK),
        }
    }

    /// Layout the renderer draws with.
    #[must_use]
    pub const fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    /// Fill colors actually used for `state`: monochrome sinks always get
    /// black background and white eyes.
    #[must_use]
    pub const fn colors(&self, state: &AnimationState) -> (Rgb888, Rgb888) {
        match self.mode {
            ColorMode::Monochrome => (Rgb888::BLACK, Rgb888::WHITE),
            ColorMode::Color => (
                state.background_color.to_rgb888(),
                state.eye_color.to_rgb888(),
            ),
        }
    }

    /// Rasterize one frame. The returned buffer is reused by the next call.
    pub fn render(&mut self, state: &AnimationState) -> &Frame {
        let (background, eye) = self.colors(state);
        let face = geometry::compose(&self.layout, state);
        self.frame.fill(background);
        for eye_geometry in [face.left, face.right] {
            draw_eye(&mut self.frame, &eye_geometry, eye, background);
        }
        &self.frame
    }
}

fn paint<D>(frame: &mut Frame, drawable: &D)
where
    D: Drawable<Color = Rgb888>,
{
    match drawable.draw(frame) {
        Ok(_) => {}
        Err(never) => match never {},
    }
}

fn rounded(bounds: &EyeBox, radius: i32) -> RoundedRectangle {
    let radius = radius.min(bounds.width() / 2).min(bounds.height() / 2);
    let radius = u32::try_from(radius).unwrap_or(0);
    RoundedRectangle::with_equal_corners(
        Rectangle::with_corners(
            Point::new(bounds.x0, bounds.y0),
            Point::new(bounds.x1, bounds.y1),
        ),
        Size::new(radius, radius),
    )
}

fn draw_eye(
    frame: &mut Frame,
    eye: &EyeGeometry,
    fill: Rgb888,
    background: Rgb888,
) {
    let eye_style = PrimitiveStyle::with_fill(fill);
    let mask_style = PrimitiveStyle::with_fill(background);

    paint(frame, &rounded(&eye.bounds, eye.radius).into_styled(eye_style));

    if let Some([a, b, c, d]) = eye.top_lid {
        paint(frame, &Triangle::new(a, b, c).into_styled(mask_style));
        paint(frame, &Triangle::new(a, c, d).into_styled(mask_style));
    }
    if let Some(bottom) = eye.bottom_lid {
        paint(frame, &rounded(&bottom, eye.radius).into_styled(mask_style));
    }
}
