//! Pacing and cooperative cancellation for auto-play
//!
//! Auto-play runs on the caller's thread. Between visits it hands the
//! computed delay to a [`Pacer`]; afterwards it re-checks the
//! [`StopHandle`]. A pause that is already underway is never interrupted,
//! its continuation just reports nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Suspends auto-play between two visits
pub trait Pacer {
    /// Wait for `delay` before the next visit
    fn pause(&mut self, delay: Duration);
}

/// Blocks the current thread for the full delay
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

impl<F: FnMut(Duration)> Pacer for F {
    fn pause(&mut self, delay: Duration) {
        self(delay)
    }
}

/// Shared "still playing" flag
///
/// Clones share the flag, so a renderer, pacer or another thread can end an
/// auto-play that is blocked inside `run`.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    playing: Arc<AtomicBool>,
}

impl StopHandle {
    /// Fresh handle, not playing
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect at the next resumption
    pub fn stop(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    /// Whether auto-play should keep going
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    pub(crate) fn arm(&self) {
        self.playing.store(true, Ordering::SeqCst);
    }
}
