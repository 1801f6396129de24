use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use super::{ColorMode, DisplaySink};
use crate::error::EyesError;
use crate::renderer::Frame;

#[derive(Debug, Default)]
struct LogInner {
    frames: VecDeque<Frame>,
    displayed: usize,
}

/// Shared view of the frames a [`MemorySink`] received.
///
/// Cloning is cheap; all clones observe the same sink.
#[derive(Debug, Clone, Default)]
pub struct FrameLog {
    inner: Arc<Mutex<LogInner>>,
}

impl FrameLog {
    fn with_inner<R>(&self, f: impl FnOnce(&mut LogInner) -> R) -> R {
        let mut guard =
            self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Total number of frames displayed so far.
    #[must_use]
    pub fn displayed(&self) -> usize {
        self.with_inner(|log| log.displayed)
    }

    /// Most recent frame, if any.
    #[must_use]
    pub fn last(&self) -> Option<Frame> {
        self.with_inner(|log| log.frames.back().cloned())
    }

    /// Retained frames, oldest first.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.with_inner(|log| log.frames.iter().cloned().collect())
    }
}

/// In-memory sink that records frames.
///
/// Useful for tests and for embedding the face into another renderer.
#[derive(Debug)]
pub struct MemorySink {
    width: u32,
    height: u32,
    mode: ColorMode,
    log: FrameLog,
    retain: usize,
    fail_after: Option<usize>,
}

impl MemorySink {
    /// Create a sink that keeps the last 16 frames.
    #[must_use]
    pub fn new(width: u32, height: u32, mode: ColorMode) -> Self {
        Self {
            width,
            height,
            mode,
            log: FrameLog::default(),
            retain: 16,
            fail_after: None,
        }
    }

    /// Keep at most `count` frames (at least one).
    #[must_use]
    pub fn retaining(mut self, count: usize) -> Self {
        self.retain = count.max(1);
        self
    }

    /// Fail every submission after `count` frames were accepted.
    #[must_use]
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Handle to the recorded frames.
    #[must_use]
    pub fn log(&self) -> FrameLog {
        self.log.clone()
    }
}

impl DisplaySink for MemorySink {
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
        let retain = self.retain;
        let fail_after = self.fail_after;
        self.log.with_inner(|log| {
            if fail_after.is_some_and(|limit| log.displayed >= limit) {
                return Err(EyesError::Sink(std::io::Error::other(
                    "memory sink closed",
                )));
            }
            log.displayed += 1;
            log.frames.push_back(frame.clone());
            while log.frames.len() > retain {
                let _ = log.frames.pop_front();
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

    use super::*;

    #[test]
    fn keeps_only_the_newest_frames() {
        let mut sink = MemorySink::new(4, 2, ColorMode::Color).retaining(2);
        let log = sink.log();
        for shade in [10, 20, 30] {
            let frame = Frame::new(4, 2, Rgb888::new(shade, 0, 0));
            sink.display(&frame).unwrap();
        }
        assert_eq!(log.displayed(), 3);
        let frames = log.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].pixel(0, 0), Some(Rgb888::new(20, 0, 0)));
        assert_eq!(log.last().unwrap().pixel(3, 1), Some(Rgb888::new(30, 0, 0)));
    }

    #[test]
    fn fails_after_limit() {
        let mut sink =
            MemorySink::new(2, 2, ColorMode::Monochrome).failing_after(1);
        let frame = Frame::new(2, 2, Rgb888::BLACK);
        assert!(sink.display(&frame).is_ok());
        assert!(matches!(sink.display(&frame), Err(EyesError::Sink(_))));
        assert_eq!(sink.log().displayed(), 1);
    }
}
