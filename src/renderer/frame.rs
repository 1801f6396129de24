use std::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{
    DrawTarget, OriginDimensions, Pixel, Size,
};

use crate::options::Rotation;

/// A row-major RGB pixel buffer.
///
/// Monochrome sinks only ever receive pure black and white pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl Frame {
    /// A frame filled with `color`.
    #[must_use]
    pub fn new(width: u32, height: u32, color: Rgb888) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    const fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set one pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb888) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Overwrite every pixel.
    pub fn fill(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb888]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Number of pixels with exactly this color.
    #[must_use]
    pub fn count(&self, color: Rgb888) -> usize {
        self.pixels.iter().filter(|p| **p == color).count()
    }

    /// Copy of the frame turned clockwise by `rotation`.
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let (w, h) = (self.width, self.height);
        let turns = rotation.quarter_turns();
        if turns == 0 {
            return self.clone();
        }
        let (out_w, out_h) = if turns % 2 == 0 { (w, h) } else { (h, w) };
        let mut out = Self::new(out_w, out_h, Rgb888::default());
        for y in 0..h {
            for x in 0..w {
                let (nx, ny) = match turns {
                    1 => (h - 1 - y, x),
                    2 => (w - 1 - x, h - 1 - y),
                    _ => (y, w - 1 - x),
                };
                out.pixels[(ny * out_w + nx) as usize] =
                    self.pixels[(y * w + x) as usize];
            }
        }
        out
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Frame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) =
                (u32::try_from(point.x), u32::try_from(point.y))
            {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}
