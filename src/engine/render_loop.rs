use std::collections::VecDeque;
use std::sync::mpsc::{self, TryRecvError};

use super::{Reply, Request};
use crate::animation::{AnimationState, FaceAnimator, TickOutcome};
use crate::error::EyesError;
use crate::renderer::FaceRenderer;
use crate::sink::DisplaySink;
use crate::util::FrameTiming;

/// Whether the loop keeps going after draining requests.
enum Flow {
    Continue,
    Stop,
}

/// State owned by the `face-render` thread.
pub(super) struct RenderLoop {
    animator: FaceAnimator,
    renderer: FaceRenderer,
    sink: Box<dyn DisplaySink>,
    timing: FrameTiming,
    /// Reply channels, aligned with the animator's queue (front = active).
    waiters: VecDeque<Option<Reply>>,
    requests: mpsc::Receiver<Request>,
    snapshots: triple_buffer::Input<AnimationState>,
}

impl RenderLoop {
    pub(super) fn new(
        animator: FaceAnimator,
        renderer: FaceRenderer,
        sink: Box<dyn DisplaySink>,
        fps: u32,
        requests: mpsc::Receiver<Request>,
        snapshots: triple_buffer::Input<AnimationState>,
    ) -> Self {
        Self {
            animator,
            renderer,
            sink,
            timing: FrameTiming::new(fps),
            waiters: VecDeque::new(),
            requests,
            snapshots,
        }
    }

    /// Thread body. Returns when shut down, or with the sink error that
    /// stopped it.
    pub(super) fn run(mut self) -> Result<(), EyesError> {
        let result = loop {
            if let Flow::Stop = self.drain_requests() {
                break Ok(());
            }
            if let Err(e) = self.tick() {
                log::error!("display sink failed: {e}");
                break Err(e);
            }
            std::thread::sleep(self.timing.remaining());
            self.timing.end_frame();
        };
        self.fail_waiters(|| EyesError::EngineStopped);
        log::info!("face engine stopped ({:.1} fps)", self.timing.fps());
        result
    }

    fn drain_requests(&mut self) -> Flow {
        loop {
            match self.requests.try_recv() {
                Ok(Request::Command { command, reply }) => {
                    self.animator.enqueue(command);
                    self.waiters.push_back(reply);
                }
                Ok(Request::Cancel) => {
                    let dropped = self.animator.cancel();
                    if dropped > 0 {
                        log::info!("cancelled {dropped} command(s)");
                    }
                    self.fail_waiters(|| EyesError::Cancelled);
                }
                Ok(Request::Shutdown) | Err(TryRecvError::Disconnected) => {
                    return Flow::Stop;
                }
                Err(TryRecvError::Empty) => return Flow::Continue,
            }
        }
    }

    fn fail_waiters(&mut self, error: impl Fn() -> EyesError) {
        for reply in self.waiters.drain(..).flatten() {
            let _ = reply.send(Err(error()));
        }
    }

    fn tick(&mut self) -> Result<(), EyesError> {
        let outcome = self.animator.tick();
        let state = *self.animator.state();
        self.snapshots.write(state);

        let frame = self.renderer.render(&state);
        self.sink.display(frame)?;

        if let TickOutcome::Completed(_) = outcome {
            if let Some(Some(reply)) = self.waiters.pop_front() {
                let _ = reply.send(Ok(()));
            }
        }
        Ok(())
    }
}
