//! Playback of traversal sessions
//!
//! A [`Session`] owns one traversal cursor plus the snapshot it reads and
//! moves through `Running -> Found | Exhausted | Stopped`. The
//! [`Controller`] owns at most one session and drives it either by
//! auto-play (paced by a [`Pacer`], cancelled through a [`StopHandle`]) or by
//! explicit steps.

mod controller;
mod pacer;
mod renderer;

pub use controller::Controller;
pub use pacer::{Pacer, StopHandle, ThreadPacer};
pub use renderer::{RecordingRenderer, RenderEvent, Renderer};

use std::fmt;
use std::sync::Arc;

use crate::model::{Element, Slot, Target};
use crate::traversal::{Algorithm, Plan, Traversal};

/// How the session is being driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// One index per explicit request
    Step,

    /// Timer-paced, runs until terminal or cancelled
    Auto,
}

/// Lifecycle of a traversal session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    /// No session exists
    Idle,

    /// Indices may still be produced
    Running,

    /// The target was visited
    Found,

    /// The cursor ran out without a match
    Exhausted,

    /// Cancelled while running
    Stopped,
}

impl SessionState {
    /// Found, Exhausted and Stopped accept no further steps
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Found | SessionState::Exhausted | SessionState::Stopped
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Found => "found",
            SessionState::Exhausted => "exhausted",
            SessionState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Outcome of one advance
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// An index was visited and the traversal goes on
    Visit {
        /// Visited index into the session's source
        index: usize,
        /// Element at that index
        value: Option<Element>,
    },

    /// An index was visited and holds the target; the session halted
    Found {
        /// Index of the match
        index: usize,
        /// The matching element
        value: Option<Element>,
    },

    /// The cursor just ran out
    Exhausted,

    /// The session had already ended; nothing more to report
    Finished(SessionState),

    /// No session could be started (validation failed)
    Rejected,
}

impl Step {
    /// Index reported by this step, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            Step::Visit { index, .. } | Step::Found { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// True when no further index will follow
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Step::Visit { .. })
    }
}

/// One traversal in flight
#[derive(Debug, Clone)]
pub struct Session {
    algorithm: Algorithm,
    target: Option<Target>,
    source: Arc<[Slot]>,
    cursor: Traversal,
    mode: PlayMode,
    state: SessionState,
    visits: usize,
}

impl Session {
    /// Start a session over a prepared plan
    pub fn new(algorithm: Algorithm, target: Option<Target>, plan: Plan, mode: PlayMode) -> Self {
        Self {
            algorithm,
            target,
            source: plan.source,
            cursor: plan.cursor,
            mode,
            state: SessionState::Running,
            visits: 0,
        }
    }

    /// Pull the next index and classify it.
    ///
    /// A terminal session keeps answering [`Step::Finished`].
    pub fn advance(&mut self) -> Step {
        if self.state != SessionState::Running {
            return Step::Finished(self.state);
        }

        let Some(index) = self.cursor.next() else {
            self.state = SessionState::Exhausted;
            return Step::Exhausted;
        };
        self.visits += 1;

        let value = self.source.get(index).cloned().flatten();
        let hit = self
            .target
            .as_ref()
            .is_some_and(|target| target.matches_slot(value.as_ref()));

        if hit {
            self.state = SessionState::Found;
            Step::Found { index, value }
        } else {
            Step::Visit { index, value }
        }
    }

    /// Cancel; only a running session becomes Stopped
    pub fn stop(&mut self) {
        if self.state == SessionState::Running {
            self.state = SessionState::Stopped;
        }
    }

    /// Algorithm being played
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Target being searched for
    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Snapshot the indices refer to
    pub fn source(&self) -> &[Slot] {
        &self.source
    }

    /// Driving mode
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Indices reported so far
    pub fn visits(&self) -> usize {
        self.visits
    }
}
