use std::sync::mpsc;
use std::thread::JoinHandle;

use super::{Request, Reply};
use crate::animation::{
    AnimationState, Direction, Expression, EyeSelector, FaceCommand, Speed,
};
use crate::error::EyesError;
use crate::options::Color;

/// Completion of one submitted command.
#[derive(Debug)]
#[must_use = "a pending command does nothing unless waited on or dropped"]
pub struct Pending {
    reply: Option<mpsc::Receiver<Result<(), EyesError>>>,
}

impl Pending {
    fn send(requests: &mpsc::Sender<Request>, command: FaceCommand) -> Self {
        let (reply_tx, reply_rx): (Reply, _) = mpsc::channel();
        let request = Request::Command {
            command,
            reply: Some(reply_tx),
        };
        match requests.send(request) {
            Ok(()) => Self {
                reply: Some(reply_rx),
            },
            Err(_) => Self { reply: None },
        }
    }

    /// Block until the command converged.
    ///
    /// # Errors
    ///
    /// [`EyesError::Cancelled`] if it was cancelled, or
    /// [`EyesError::EngineStopped`] if the render thread ended first.
    pub fn wait(self) -> Result<(), EyesError> {
        self.reply
            .ok_or(EyesError::EngineStopped)?
            .recv()
            .unwrap_or(Err(EyesError::EngineStopped))
    }
}

/// Caller-side handle to a running [`FaceEngine`](super::FaceEngine).
///
/// The blocking methods (`look`, `blink`, ...) return once the command has
/// converged and the frame showing its final state was presented. Dropping
/// the handle shuts the engine down.
pub struct FaceHandle {
    requests: mpsc::Sender<Request>,
    snapshots: triple_buffer::Output<AnimationState>,
    thread: Option<JoinHandle<Result<(), EyesError>>>,
}

impl FaceHandle {
    pub(super) fn new(
        requests: mpsc::Sender<Request>,
        snapshots: triple_buffer::Output<AnimationState>,
        thread: JoinHandle<Result<(), EyesError>>,
    ) -> Self {
        Self {
            requests,
            snapshots,
            thread: Some(thread),
        }
    }

    /// Queue a command without waiting for it.
    pub fn submit(&self, command: FaceCommand) -> Pending {
        Pending::send(&self.requests, command)
    }

    /// Queue a command and block until it finished.
    ///
    /// # Errors
    ///
    /// See [`Pending::wait`].
    pub fn execute(&self, command: FaceCommand) -> Result<(), EyesError> {
        self.submit(command).wait()
    }

    /// Ease the eyelids into `expression`.
    ///
    /// # Errors
    ///
    /// See [`Pending::wait`].
    pub fn change_face(
        &self,
        expression: Expression,
    ) -> Result<(), EyesError> {
        self.execute(FaceCommand::ChangeFace { expression })
    }

    /// Move the gaze toward `direction`.
    ///
    /// # Errors
    ///
    /// See [`Pending::wait`].
    pub fn look(
        &self,
        direction: Direction,
        speed: Speed,
    ) -> Result<(), EyesError> {
        self.execute(FaceCommand::Look { direction, speed })
    }

    /// Close the selected eyes.
    ///
    /// # Errors
    ///
    /// See [`Pending::wait`].
    pub fn close_eyes(
        &self,
        eye: EyeSelector,
        speed: Speed,
    ) -> Result<(), EyesError> {
        self.execute(FaceCommand::CloseEyes { eye, speed })
    }

    /// Open the selected eyes.
    ///
    /// # Errors
    ///
    /// See [`Pending::wait`].
    pub fn open_eyes(
        &self,
        eye: EyeSelector,
        speed: Speed,
    ) -> Result<(), EyesError> {
        self.execute(FaceCommand::OpenEyes { eye, speed })
    }

    /// Close and reopen the selected eyes.
    ///
    /// # Errors
    ///
    /// See [`Pending::wait`].
    pub fn blink(
        &self,
        eye: EyeSelector,
        speed: Speed,
    ) -> Result<(), EyesError> {
        self.execute(FaceCommand::Blink { eye, speed })
    }

    /// Turn curious mode on or off.
    ///
    /// # Errors
    ///
    /// See [`Pending::wait`].
    pub fn set_curious(&self, curious: bool) -> Result<(), EyesError> {
        self.execute(FaceCommand::SetCurious { curious })
    }

    /// Replace the fill colors. Monochrome sinks ignore them.
    ///
    /// # Errors
    ///
    /// See [`Pending::wait`].
    pub fn set_colors(
        &self,
        background: Color,
        eye: Color,
    ) -> Result<(), EyesError> {
        self.execute(FaceCommand::SetColors { background, eye })
    }

    /// Drop the active command and everything queued at the next tick.
    /// Their waiters receive [`EyesError::Cancelled`].
    pub fn cancel(&self) {
        let _ = self.requests.send(Request::Cancel);
    }

    /// Latest state published by the render thread.
    pub fn snapshot(&mut self) -> AnimationState {
        *self.snapshots.read()
    }

    /// Whether the render thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn join_thread(&mut self) -> Result<(), EyesError> {
        match self.thread.take() {
            Some(thread) => {
                thread.join().unwrap_or(Err(EyesError::EngineStopped))
            }
            None => Ok(()),
        }
    }

    /// Stop the render thread and wait for it.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the thread earlier, if any.
    pub fn shutdown(mut self) -> Result<(), EyesError> {
        let _ = self.requests.send(Request::Shutdown);
        self.join_thread()
    }

    /// Wait for the render thread to stop on its own.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the thread, if any.
    pub fn join(mut self) -> Result<(), EyesError> {
        self.join_thread()
    }
}

impl Drop for FaceHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            let _ = self.requests.send(Request::Shutdown);
            let _ = self.join_thread();
        }
    }
}

impl std::fmt::Debug for FaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceHandle")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
