//! Playback controller: the context object behind every user action
//!
//! Owns the sequence model, the selected algorithm and target, the pacing
//! config and the single active session. Every operation is total: problems
//! surface as renderer notifications, never as errors.

use tracing::{debug, info, trace, warn};

use super::{Pacer, PlayMode, Renderer, Session, SessionState, Step, StopHandle, ThreadPacer};
use crate::model::{parse_values, Element, Sequence, Slot, StructureKind, Target};
use crate::traversal::{self, Algorithm};
use crate::{validate_speed, PlaybackConfig};

const NEEDS_NUMBERS: &str = "Binary Search needs numeric, sorted data.";
const SWITCHING_TO_TREE: &str = "Traversal runs on Binary Tree. Switching.";
const NO_MORE_STEPS: &str = "No more steps";

/// Drives traversals over the current structure and reports to `R`
#[derive(Debug)]
pub struct Controller<R, P = ThreadPacer> {
    sequence: Sequence,
    algorithm: Algorithm,
    target: Option<Target>,
    config: PlaybackConfig,
    session: Option<Session>,
    playing: StopHandle,
    renderer: R,
    pacer: P,
}

impl<R: Renderer> Controller<R, ThreadPacer> {
    /// Controller that sleeps the calling thread between auto-play visits
    pub fn new(renderer: R) -> Self {
        Self::with_pacer(renderer, ThreadPacer)
    }
}

impl<R: Renderer, P: Pacer> Controller<R, P> {
    /// Controller with a custom pacer
    pub fn with_pacer(renderer: R, pacer: P) -> Self {
        Self {
            sequence: Sequence::default(),
            algorithm: Algorithm::default(),
            target: None,
            config: PlaybackConfig::default(),
            session: None,
            playing: StopHandle::new(),
            renderer,
            pacer,
        }
    }

    /// Replace the pacing config
    pub fn with_config(mut self, config: PlaybackConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an externally created stop handle
    pub fn with_stop_handle(mut self, handle: StopHandle) -> Self {
        self.playing = handle;
        self
    }

    // ----- accessors -----

    /// Structure on display
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Selected algorithm
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Current search target
    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Pacing config
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Active (or last finished) session
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Lifecycle state; `Idle` without a session
    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Idle, Session::state)
    }

    /// Handle that cancels a running auto-play
    pub fn stop_handle(&self) -> StopHandle {
        self.playing.clone()
    }

    /// Rendering collaborator
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Rendering collaborator, mutably
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Give back the renderer
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    // ----- structure operations -----

    /// Switch structure kind
    pub fn set_structure_mode(&mut self, kind: StructureKind) {
        self.discard_session();
        self.renderer.on_clear_highlights();
        self.sequence.set_kind(kind);
        self.renderer.on_status("Ready");
        self.render();
    }

    /// Replace the structure with values parsed from free text
    pub fn load_text(&mut self, input: &str) {
        self.load_slots(parse_values(input).into_iter().map(Some).collect());
    }

    /// Replace the structure with present elements
    pub fn load_values(&mut self, values: Vec<Element>) {
        self.load_slots(values.into_iter().map(Some).collect());
    }

    /// Replace the structure; `None` slots are tree gaps
    pub fn load_slots(&mut self, slots: Vec<Slot>) {
        self.discard_session();
        let count = slots.len();
        self.sequence.load(slots);
        debug!(count, kind = %self.sequence.kind(), "structure loaded");
        let plural = if count == 1 { "" } else { "s" };
        self.renderer
            .on_status(&format!("Loaded {count} value{plural}"));
        self.render();
    }

    /// Add the first value parsed from `input`; blank input is a no-op
    pub fn add_text(&mut self, input: &str) {
        match parse_values(input).into_iter().next() {
            Some(value) => self.add(value),
            None => self.renderer.on_status("Nothing to add"),
        }
    }

    /// Add one value per the active kind
    pub fn add(&mut self, value: Element) {
        self.discard_session();
        trace!(%value, "add");
        self.sequence.add(value);
        self.render();
    }

    /// Remove one value per the active kind; no-op when empty
    pub fn remove(&mut self) {
        self.discard_session();
        match self.sequence.remove() {
            Some(removed) => {
                trace!(?removed, "remove");
                self.render();
            }
            None => self.renderer.on_status("Nothing to remove"),
        }
    }

    /// Empty the structure
    pub fn clear(&mut self) {
        self.discard_session();
        self.sequence.clear();
        self.render();
        self.renderer.on_status("Cleared");
    }

    // ----- traversal settings -----

    /// Choose the algorithm for the next traversal
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        if algorithm != self.algorithm {
            self.discard_session();
        }
        self.algorithm = algorithm;
    }

    /// Set the target from user text; blank clears it
    pub fn set_target(&mut self, input: &str) {
        let target = Target::parse(input);
        if target != self.target {
            self.discard_session();
        }
        self.target = target;
    }

    /// Change the speed multiplier; invalid values are ignored
    pub fn set_speed(&mut self, speed: f64) {
        match validate_speed(speed) {
            Ok(()) => self.config.speed = speed,
            Err(err) => warn!(%err, kept = self.config.speed, "speed unchanged"),
        }
    }

    // ----- playback -----

    /// Auto-play a fresh traversal until it ends or is cancelled.
    ///
    /// Blocks the calling thread; cancellation goes through
    /// [`Controller::stop_handle`].
    pub fn run(&mut self) -> SessionState {
        self.discard_session();
        self.renderer.on_clear_highlights();
        self.playing.arm();

        let Some(session) = self.begin(PlayMode::Auto) else {
            self.playing.stop();
            return SessionState::Idle;
        };
        self.session = Some(session);

        loop {
            if !self.playing.is_playing() {
                self.halt();
                return SessionState::Stopped;
            }
            if self.advance().is_terminal() {
                break;
            }
            self.pacer.pause(self.config.delay());
        }

        self.playing.stop();
        self.state()
    }

    /// Advance one index, starting a step session if none exists
    pub fn step(&mut self) -> Step {
        let resumable = self.session.as_ref().is_some_and(|session| {
            session.mode() == PlayMode::Step && session.state() != SessionState::Stopped
        });

        if !resumable {
            self.discard_session();
            self.renderer.on_clear_highlights();
            match self.begin(PlayMode::Step) {
                Some(session) => self.session = Some(session),
                None => return Step::Rejected,
            }
        }
        self.advance()
    }

    /// Cancel playback.
    ///
    /// The session stays visible as Stopped until the next run, step or
    /// reset; a following step starts over.
    pub fn stop(&mut self) {
        self.playing.stop();
        self.halt();
    }

    /// Forget the session and clear highlights
    pub fn reset(&mut self) {
        self.playing.stop();
        self.discard_session();
        self.renderer.on_clear_highlights();
        self.renderer.on_status("Reset");
    }

    // ----- internals -----

    fn render(&mut self) {
        self.renderer
            .on_render(self.sequence.kind(), self.sequence.slots());
    }

    fn discard_session(&mut self) {
        if let Some(session) = self.session.take() {
            if session.state() == SessionState::Running {
                debug!(algorithm = %session.algorithm(), visits = session.visits(), "session discarded");
            }
        }
    }

    fn halt(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stop();
            info!(algorithm = %session.algorithm(), state = %session.state(), "playback stopped");
        }
        self.renderer.on_status("Stopped");
    }

    /// Prepare a session for the selected algorithm over the current data.
    fn begin(&mut self, mode: PlayMode) -> Option<Session> {
        let algorithm = self.algorithm;

        if algorithm.is_tree_traversal() && self.sequence.kind() != StructureKind::BinaryTree {
            self.renderer.on_status(SWITCHING_TO_TREE);
            self.sequence.set_kind(StructureKind::BinaryTree);
            self.render();
        }

        let plan = match traversal::plan(algorithm, self.sequence.slots(), self.target.as_ref()) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(%err, "traversal refused");
                self.renderer.on_validation_error(NEEDS_NUMBERS);
                self.renderer.on_status(NEEDS_NUMBERS);
                return None;
            }
        };

        if plan.sorted {
            self.sequence.load(plan.source.to_vec());
            if self.sequence.kind() == StructureKind::BinaryTree {
                self.sequence.set_kind(StructureKind::LinkedList);
            }
            self.renderer.on_clear_highlights();
            self.render();
        }

        if algorithm.is_tree_traversal() {
            if let Some(target) = &self.target {
                for (index, slot) in plan.source.iter().enumerate() {
                    if target.matches_slot(slot.as_ref()) {
                        self.renderer.on_target_marked(index);
                    }
                }
            }
        }

        debug!(
            %algorithm,
            ?mode,
            len = plan.source.len(),
            target = ?self.target,
            "session started"
        );
        Some(Session::new(algorithm, self.target.clone(), plan, mode))
    }

    /// Advance the session and report the outcome.
    fn advance(&mut self) -> Step {
        let Some(session) = self.session.as_mut() else {
            self.renderer.on_status(NO_MORE_STEPS);
            return Step::Finished(SessionState::Idle);
        };
        let algorithm = session.algorithm();
        let mode = session.mode();
        let step = session.advance();
        let shown = session
            .target()
            .map(ToString::to_string)
            .unwrap_or_default();

        match &step {
            Step::Visit { index, value } => {
                trace!(index, ?value, "visit");
                self.report_visit(algorithm, *index, value.as_ref());
            }
            Step::Found { index, value } => {
                self.report_visit(algorithm, *index, value.as_ref());
                info!(index, %algorithm, "target found");
                self.renderer.on_target_found(*index, value.as_ref());
                self.renderer
                    .on_status(&format!("Found target {shown} at index {index}"));
            }
            Step::Exhausted => {
                info!(%algorithm, "traversal exhausted");
                self.renderer.on_traversal_complete();
                let done = if algorithm.is_search() {
                    "Search complete"
                } else {
                    "Traversal complete"
                };
                self.renderer.on_status(done);
                if mode == PlayMode::Step {
                    self.renderer.on_status(NO_MORE_STEPS);
                }
            }
            Step::Finished(_) | Step::Rejected => self.renderer.on_status(NO_MORE_STEPS),
        }
        step
    }

    fn report_visit(&mut self, algorithm: Algorithm, index: usize, value: Option<&Element>) {
        let label = algorithm.label();
        self.renderer.on_visit(index, value, label);
        let message = match value {
            Some(value) => format!("{label} visiting index {index} (value {value})"),
            None => format!("{label} visiting index {index}"),
        };
        self.renderer.on_status(&message);
    }
}
