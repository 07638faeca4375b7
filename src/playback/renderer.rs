//! Seam to the rendering collaborator
//!
//! The core never draws. It tells a [`Renderer`] what happened and leaves
//! layout, highlighting and text to it.

use crate::model::{Element, Slot, StructureKind};

/// Receiver of playback notifications
///
/// The first five callbacks are the core protocol. The rest default to
/// no-ops for renderers that do not redraw or pre-mark.
pub trait Renderer {
    /// An index was visited
    fn on_visit(&mut self, index: usize, value: Option<&Element>, label: &str);

    /// The visited element equals the target
    fn on_target_found(&mut self, index: usize, value: Option<&Element>);

    /// Human-readable status line
    fn on_status(&mut self, message: &str);

    /// The traversal ran out without a match
    fn on_traversal_complete(&mut self);

    /// A traversal was refused before it started
    fn on_validation_error(&mut self, message: &str);

    /// The displayed structure changed
    fn on_render(&mut self, _kind: StructureKind, _slots: &[Slot]) {}

    /// Highlights from a previous traversal should go
    fn on_clear_highlights(&mut self) {}

    /// `index` holds the target (reported before a tree traversal starts)
    fn on_target_marked(&mut self, _index: usize) {}
}

/// One recorded notification
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderEvent {
    /// See [`Renderer::on_visit`]
    Visit {
        /// Visited index
        index: usize,
        /// Element there
        value: Option<Element>,
        /// Algorithm label
        label: String,
    },
    /// See [`Renderer::on_target_found`]
    TargetFound {
        /// Index of the match
        index: usize,
        /// Matching element
        value: Option<Element>,
    },
    /// See [`Renderer::on_status`]
    Status(String),
    /// See [`Renderer::on_traversal_complete`]
    TraversalComplete,
    /// See [`Renderer::on_validation_error`]
    ValidationError(String),
    /// See [`Renderer::on_render`]
    Render {
        /// Structure kind on display
        kind: StructureKind,
        /// Slots on display
        slots: Vec<Slot>,
    },
    /// See [`Renderer::on_clear_highlights`]
    ClearHighlights,
    /// See [`Renderer::on_target_marked`]
    TargetMarked(usize),
}

/// Renderer that keeps every notification, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    /// Everything recorded so far
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Drop the recording
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Visited indices in order
    pub fn visited(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Visit { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    /// Status lines in order
    pub fn statuses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Status(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Most recent status line
    pub fn last_status(&self) -> Option<&str> {
        self.statuses().pop()
    }

    /// First reported match
    pub fn found(&self) -> Option<(usize, Option<&Element>)> {
        self.events.iter().find_map(|event| match event {
            RenderEvent::TargetFound { index, value } => Some((*index, value.as_ref())),
            _ => None,
        })
    }

    /// Validation messages in order
    pub fn validation_errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::ValidationError(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// How many traversals ran out
    pub fn completions(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, RenderEvent::TraversalComplete))
            .count()
    }

    /// Last structure handed to [`Renderer::on_render`]
    pub fn last_render(&self) -> Option<(StructureKind, &[Slot])> {
        self.events.iter().rev().find_map(|event| match event {
            RenderEvent::Render { kind, slots } => Some((*kind, slots.as_slice())),
            _ => None,
        })
    }

    /// Indices pre-marked as holding the target
    pub fn marked(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::TargetMarked(index) => Some(*index),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn on_visit(&mut self, index: usize, value: Option<&Element>, label: &str) {
        self.events.push(RenderEvent::Visit {
            index,
            value: value.cloned(),
            label: label.to_string(),
        });
    }

    fn on_target_found(&mut self, index: usize, value: Option<&Element>) {
        self.events.push(RenderEvent::TargetFound {
            index,
            value: value.cloned(),
        });
    }

    fn on_status(&mut self, message: &str) {
        self.events.push(RenderEvent::Status(message.to_string()));
    }

    fn on_traversal_complete(&mut self) {
        self.events.push(RenderEvent::TraversalComplete);
    }

    fn on_validation_error(&mut self, message: &str) {
        self.events.push(RenderEvent::ValidationError(message.to_string()));
    }

    fn on_render(&mut self, kind: StructureKind, slots: &[Slot]) {
        self.events.push(RenderEvent::Render {
            kind,
            slots: slots.to_vec(),
        });
    }

    fn on_clear_highlights(&mut self) {
        self.events.push(RenderEvent::ClearHighlights);
    }

    fn on_target_marked(&mut self, index: usize) {
        self.events.push(RenderEvent::TargetMarked(index));
    }
}
