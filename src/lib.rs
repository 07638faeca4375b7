//! # Step-by-step traversal engine for teaching data structures
//!
//! Drives the visualization of stacks, queues, linked lists and
//! array-encoded binary trees while an algorithm walks over them.
//!
//! ## Pieces
//!
//! 1. **Sequence model** ([`model`]): the values on display and how
//!    add/remove behave for the active structure kind
//! 2. **Traversal engine** ([`traversal`]): lazy iterators of visited
//!    indices for BFS, pre/in/post-order DFS, linear and binary search
//! 3. **Playback** ([`playback`]): one session at a time, advanced either
//!    by timed auto-play or by explicit steps, reporting every visit to a
//!    [`Renderer`]
//!
//! Rendering itself lives outside the crate; the core only notifies.
//!
//! ## Usage Example
//!
//! ```
//! use stepwise::{Algorithm, Controller, RecordingRenderer, StructureKind};
//!
//! let mut controller = Controller::new(RecordingRenderer::default());
//! controller.set_structure_mode(StructureKind::BinaryTree);
//! controller.load_text("5, 3, 8, 1");
//! controller.select_algorithm(Algorithm::InOrder);
//!
//! controller.step();
//! assert_eq!(controller.renderer().visited(), vec![3]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod model; // Elements, parsing, structure semantics
pub mod playback; // Sessions, controller, pacing, renderer seam
pub mod traversal; // Lazy visit sequences

pub use model::{parse_slots, parse_values, Element, Sequence, Slot, StructureKind, Target};
pub use playback::{
    Controller, Pacer, PlayMode, RecordingRenderer, RenderEvent, Renderer, Session, SessionState,
    Step, StopHandle, ThreadPacer,
};
pub use traversal::{Algorithm, Traversal, TraversalError};

use std::time::Duration;

use thiserror::Error;

/// Base pause between auto-play visits at speed 1×
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(700);

/// Pacing parameters for auto-play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    /// Pause at speed 1×
    pub base_delay: Duration,

    /// Speed multiplier; the pause is `base_delay / speed`
    pub speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            speed: 1.0,
        }
    }
}

impl PlaybackConfig {
    /// Same config at a different speed
    pub fn with_speed(self, speed: f64) -> Result<Self, VisualizerError> {
        validate_speed(speed)?;
        Ok(Self { speed, ..self })
    }

    /// Same config with a different base delay
    pub fn with_base_delay(self, base_delay: Duration) -> Self {
        Self { base_delay, ..self }
    }

    /// Pause between two visits
    pub fn delay(&self) -> Duration {
        let nanos = self.base_delay.as_nanos() as f64 / self.speed;
        Duration::from_nanos(nanos.round() as u64)
    }
}

pub(crate) fn validate_speed(speed: f64) -> Result<(), VisualizerError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(VisualizerError::InvalidSpeed(speed))
    }
}

/// Errors surfaced to callers that build inputs (CLI, embedding code)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisualizerError {
    /// Algorithm name not recognized
    #[error("unknown algorithm '{0}' (expected bfs, dfs-pre, dfs-in, dfs-post, lin or bin)")]
    UnknownAlgorithm(String),

    /// Structure name not recognized
    #[error("unknown structure '{0}' (expected stack, queue, list or tree)")]
    UnknownStructure(String),

    /// Speed multiplier must be finite and positive
    #[error("invalid speed multiplier {0}")]
    InvalidSpeed(f64),

    /// Traversal could not be prepared
    #[error(transparent)]
    Traversal(#[from] TraversalError),
}
