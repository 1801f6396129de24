//! The render engine: a background thread that owns the face.
//!
//! [`FaceEngine::spawn`] starts a `face-render` thread holding the
//! [`FaceAnimator`](crate::animation::FaceAnimator) and the display sink.
//! Callers drive it through the returned [`FaceHandle`]:
//!
//! - commands travel over an `mpsc` channel and run one at a time, in
//!   submission order; each may carry a reply channel that fires when it
//!   converges, is cancelled, or the engine stops
//! - state snapshots flow back through a lock-free triple buffer, so
//!   observers never block the render thread
//!
//! Each tick the thread drains requests, steps the active command, publishes
//! a snapshot, rasterizes and presents a frame, then sleeps out the rest of
//! the frame period.

mod handle;
mod render_loop;

pub use handle::{FaceHandle, Pending};

use std::sync::mpsc;

use self::render_loop::RenderLoop;
use crate::animation::{FaceAnimator, FaceCommand};
use crate::error::EyesError;
use crate::geometry::FaceLayout;
use crate::options::Options;
use crate::renderer::FaceRenderer;
use crate::sink::DisplaySink;

/// Reply channel for one command.
pub(crate) type Reply = mpsc::Sender<Result<(), EyesError>>;

/// Messages from handles to the render thread.
pub(crate) enum Request {
    /// Queue a command. `reply` fires once it finished.
    Command {
        command: FaceCommand,
        reply: Option<Reply>,
    },
    /// Drop the active command and the queue.
    Cancel,
    /// Stop the render thread.
    Shutdown,
}

/// Entry point for starting the render thread.
#[derive(Debug, Clone, Copy)]
pub struct FaceEngine;

impl FaceEngine {
    /// Start rendering `options` onto `sink`.
    ///
    /// The face is laid out on the sink's logical canvas; the screen size in
    /// `options` is only used to pick and build the sink.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::ThreadSpawn`] if the render thread fails to
    /// start.
    pub fn spawn(
        options: &Options,
        sink: Box<dyn DisplaySink>,
    ) -> Result<FaceHandle, EyesError> {
        let layout = FaceLayout::new(&options.eye, sink.width(), sink.height());
        let animator = FaceAnimator::new(layout, &options.render);
        let renderer = FaceRenderer::new(layout, sink.color_mode());

        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (snapshot_input, snapshot_output) =
            triple_buffer::triple_buffer(animator.state());

        let render_loop = RenderLoop::new(
            animator,
            renderer,
            sink,
            options.render.fps,
            request_rx,
            snapshot_input,
        );
        let thread = std::thread::Builder::new()
            .name("face-render".into())
            .spawn(move || render_loop.run())
            .map_err(EyesError::ThreadSpawn)?;

        log::info!(
            "face engine started ({}x{} at {} fps)",
            layout.screen_width,
            layout.screen_height,
            options.render.fps
        );
        Ok(FaceHandle::new(request_tx, snapshot_output, thread))
    }
}
