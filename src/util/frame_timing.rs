//! Frame pacing helpers for the render loop.

use web_time::{Duration, Instant};

/// Frame pacing for the render loop, with a smoothed FPS readout.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: if target_fps > 0 {
                target_fps as f32
            } else {
                60.0
            },
            smoothing: 0.05,
        }
    }

    /// Target frame rate (0 = unlimited).
    #[must_use]
    pub const fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Time left until the next frame is due. Zero when running late or
    /// unlimited.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.min_frame_duration
            .saturating_sub(self.last_frame.elapsed())
    }

    /// Call after the frame was presented (and any sleep finished).
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub const fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_waits() {
        let timing = FrameTiming::new(0);
        assert_eq!(timing.remaining(), Duration::ZERO);
        assert_eq!(timing.target_fps(), 0);
    }

    #[test]
    fn fresh_frame_waits_at_most_one_period() {
        let mut timing = FrameTiming::new(10);
        timing.end_frame();
        let remaining = timing.remaining();
        assert!(remaining <= Duration::from_millis(100));
        assert!(remaining > Duration::from_millis(50));
    }
}
