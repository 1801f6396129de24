//! Display sinks: where composed frames go.
//!
//! The render loop only knows the [`DisplaySink`] trait. Concrete sinks are
//! built from a validated [`ScreenSpec`](crate::options::ScreenSpec) through
//! the [`DriverRegistry`].

mod memory;
mod netpbm;
mod registry;
mod terminal;

pub use memory::{FrameLog, MemorySink};
pub use netpbm::NetpbmSink;
pub use registry::{DriverConstructor, DriverRegistry};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use terminal::TerminalSink;

use crate::error::EyesError;
use crate::renderer::Frame;

/// Pixel format of a display.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum ColorMode {
    /// One bit per pixel. Frames are always black and white.
    #[default]
    #[serde(rename = "1", alias = "monochrome")]
    Monochrome,
    /// Full RGB.
    #[serde(rename = "RGB", alias = "color", alias = "rgb")]
    Color,
}

/// A target that accepts fully composed frames.
///
/// Errors returned from [`display`](Self::display) are fatal to the render
/// loop; sinks should not retry internally.
pub trait DisplaySink: Send {
    /// Canvas width in pixels.
    fn width(&self) -> u32;

    /// Canvas height in pixels.
    fn height(&self) -> u32;

    /// Pixel format.
    fn color_mode(&self) -> ColorMode;

    /// Present one frame.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::Sink`] if the frame could not be presented.
    fn display(&mut self, frame: &Frame) -> Result<(), EyesError>;

    /// Switch the panel backlight, if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::Sink`] if the pin could not be driven.
    fn set_backlight(&mut self, on: bool) -> Result<(), EyesError> {
        log::debug!("backlight {} ignored by sink", if on { "on" } else { "off" });
        Ok(())
    }
}

/// A sink that discards every frame.
#[derive(Debug, Clone, Copy)]
pub struct NullSink {
    width: u32,
    height: u32,
    mode: ColorMode,
}

impl NullSink {
    /// Create a sink of the given size.
    #[must_use]
    pub const fn new(width: u32, height: u32, mode: ColorMode) -> Self {
        Self {
            width,
            height,
            mode,
        }
    }
}

impl DisplaySink for NullSink {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_mode(&self) -> ColorMode {
        self.mode
    }

    fn display(&mut self, _frame: &Frame) -> Result<(), EyesError> {
        Ok(())
    }
}
