use std::fmt::Write as _;
use std::io::{self, Write};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use super::{ColorMode, DisplaySink};
use crate::error::EyesError;
use crate::options::{Rotation, ScreenSpec};
use crate::renderer::Frame;

const CLEAR_AND_HIDE_CURSOR: &str = "\x1b[2J\x1b[?25l";
const HOME: &str = "\x1b[H";
const RESET_AND_SHOW_CURSOR: &str = "\x1b[0m\x1b[?25h";

/// Draws frames into a terminal with half-block characters.
///
/// Each character cell covers two vertically stacked pixels. Monochrome
/// frames use plain block glyphs; color frames use 24-bit ANSI colors.
pub struct TerminalSink<W: Write + Send> {
    out: W,
    width: u32,
    height: u32,
    mode: ColorMode,
    rotation: Rotation,
    started: bool,
    buffer: String,
}

impl TerminalSink<io::Stdout> {
    /// Sink writing to standard output, sized from the screen spec.
    #[must_use]
    pub fn stdout(spec: &ScreenSpec) -> Self {
        Self::new(
            io::stdout(),
            spec.width,
            spec.height,
            spec.color_mode,
            spec.rotation,
        )
    }
}

impl<W: Write + Send> TerminalSink<W> {
    /// Sink writing to an arbitrary writer.
    pub fn new(
        out: W,
        width: u32,
        height: u32,
        mode: ColorMode,
        rotation: Rotation,
    ) -> Self {
        Self {
            out,
            width,
            height,
            mode,
            rotation,
            started: false,
            buffer: String::new(),
        }
    }

    fn compose(&mut self, frame: &Frame) {
        self.buffer.clear();
        if !self.started {
            self.buffer.push_str(CLEAR_AND_HIDE_CURSOR);
            self.started = true;
        }
        self.buffer.push_str(HOME);
        for y in (0..frame.height()).step_by(2) {
            for x in 0..frame.width() {
                let top = frame.pixel(x, y).unwrap_or(Rgb888::BLACK);
                let bottom = frame.pixel(x, y + 1).unwrap_or(Rgb888::BLACK);
                match self.mode {
                    ColorMode::Monochrome => {
                        self.buffer.push(mono_glyph(top, bottom));
                    }
                    ColorMode::Color => {
                        let _ = write!(
                            self.buffer,
                            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}",
                            top.r(),
                            top.g(),
                            top.b(),
                            bottom.r(),
                            bottom.g(),
                            bottom.b()
                        );
                    }
                }
            }
            if self.mode == ColorMode::Color {
                self.buffer.push_str("\x1b[0m");
            }
            self.buffer.push_str("\r\n");
        }
    }
}

fn mono_glyph(top: Rgb888, bottom: Rgb888) -> char {
    match (top != Rgb888::BLACK, bottom != Rgb888::BLACK) {
        (true, true) => '\u{2588}',
        (true, false) => '\u{2580}',
        (false, true) => '\u{2584}',
        (false, false) => ' ',
    }
}

impl<W: Write + Send> DisplaySink for TerminalSink<W> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_mode(&self) -> ColorMode {
        self.mode
    }

    fn display(&mut self, frame: &Frame) -> Result<(), EyesError> {
        let rotated = frame.rotated(self.rotation);
        self.compose(&rotated);
        self.out
            .write_all(self.buffer.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(EyesError::Sink)
    }
}

impl<W: Write + Send> Drop for TerminalSink<W> {
    fn drop(&mut self) {
        if self.started {
            let _ = self.out.write_all(RESET_AND_SHOW_CURSOR.as_bytes());
            let _ = self.out.flush();
        }
    }
}
