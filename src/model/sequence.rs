//! Sequence model: the structure currently on display
//!
//! One flat array backs every structure kind. The kind only decides which end
//! `add`/`remove` touch and how a renderer lays the values out.

use std::fmt;
use std::str::FromStr;

use super::{Element, Slot};
use crate::VisualizerError;

/// Which structure the values are shown as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum StructureKind {
    /// Last-in-first-out: add and remove at the tail
    Stack,

    /// First-in-first-out: add at the tail, remove at the head
    Queue,

    /// Tail insertion, head removal
    LinkedList,

    /// Level-order array; children of `i` at `2i+1` and `2i+2`
    #[default]
    BinaryTree,
}

impl StructureKind {
    /// Every kind, in menu order
    pub const ALL: [StructureKind; 4] = [
        StructureKind::Stack,
        StructureKind::Queue,
        StructureKind::LinkedList,
        StructureKind::BinaryTree,
    ];

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            StructureKind::Stack => "Stack",
            StructureKind::Queue => "Queue",
            StructureKind::LinkedList => "Linked List",
            StructureKind::BinaryTree => "Binary Tree",
        }
    }

    /// True for the kinds that remove from the head
    #[inline]
    pub fn removes_from_head(self) -> bool {
        matches!(self, StructureKind::Queue | StructureKind::LinkedList)
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StructureKind {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stack" => Ok(StructureKind::Stack),
            "queue" => Ok(StructureKind::Queue),
            "list" | "linked-list" | "linked list" | "linkedlist" => Ok(StructureKind::LinkedList),
            "tree" | "binary-tree" | "binary tree" | "binarytree" => Ok(StructureKind::BinaryTree),
            _ => Err(VisualizerError::UnknownStructure(s.to_string())),
        }
    }
}

/// Stored values and the kind they are shown as
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    kind: StructureKind,
    data: Vec<Slot>,
}

impl Sequence {
    /// Empty sequence of the given kind
    pub fn new(kind: StructureKind) -> Self {
        Self {
            kind,
            data: Vec::new(),
        }
    }

    /// Active structure kind
    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    /// Switch kind; the values stay as they are
    pub fn set_kind(&mut self, kind: StructureKind) {
        self.kind = kind;
    }

    /// Replace the stored values
    pub fn load(&mut self, slots: Vec<Slot>) {
        self.data = slots;
    }

    /// Append one element; every kind inserts at the tail
    pub fn add(&mut self, value: Element) {
        self.data.push(Some(value));
    }

    /// Remove one slot per the active kind.
    ///
    /// Returns `None` when the structure was empty (no-op).
    pub fn remove(&mut self) -> Option<Slot> {
        if self.data.is_empty() {
            return None;
        }
        if self.kind.removes_from_head() {
            Some(self.data.remove(0))
        } else {
            self.data.pop()
        }
    }

    /// Empty the structure
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Stored slots, in index order
    pub fn slots(&self) -> &[Slot] {
        &self.data
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether there are no slots
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
