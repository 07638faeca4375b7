//! Traversal engine
//!
//! Every algorithm is a lazy, finite, non-restartable iterator of visited
//! indices. Absent slots are never yielded.
//!
//! [`Traversal`] wraps the concrete iterators behind one `next()` so that
//! auto-play and step mode drive the same cursor.

mod search;
mod tree;

pub use search::{BinarySearch, LinearScan};
pub use tree::{
    depth, is_present, left_child, parent, right_child, BreadthFirst, DepthFirst, DepthOrder,
};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{Element, Slot, Target};
use crate::VisualizerError;

/// Errors raised while preparing a traversal
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TraversalError {
    /// Binary search was asked to run over text
    #[error("binary search needs numeric data; found {value:?} at index {index}")]
    NonNumeric {
        /// Position of the first textual element (gaps not counted)
        index: usize,
        /// The offending text
        value: String,
    },
}

/// Selectable algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Level-order over the tree
    #[default]
    BreadthFirst,

    /// Depth-first, node before subtrees
    PreOrder,

    /// Depth-first, node between subtrees
    InOrder,

    /// Depth-first, node after subtrees
    PostOrder,

    /// Index-order scan of the flat array
    LinearSearch,

    /// Midpoint probing over the sorted numeric array
    BinarySearch,
}

impl Algorithm {
    /// Every algorithm, in menu order
    pub const ALL: [Algorithm; 6] = [
        Algorithm::BreadthFirst,
        Algorithm::PreOrder,
        Algorithm::InOrder,
        Algorithm::PostOrder,
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
    ];

    /// Label shown next to each visit
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "Breadth-First Search",
            Algorithm::PreOrder => "Depth-First (Pre-order)",
            Algorithm::InOrder => "Depth-First (In-order)",
            Algorithm::PostOrder => "Depth-First (Post-order)",
            Algorithm::LinearSearch => "Linear Search",
            Algorithm::BinarySearch => "Binary Search",
        }
    }

    /// Short name accepted by [`FromStr`]
    pub fn short_name(self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "bfs",
            Algorithm::PreOrder => "dfs-pre",
            Algorithm::InOrder => "dfs-in",
            Algorithm::PostOrder => "dfs-post",
            Algorithm::LinearSearch => "lin",
            Algorithm::BinarySearch => "bin",
        }
    }

    /// Walks tree shape (as opposed to the flat array)
    pub fn is_tree_traversal(self) -> bool {
        !self.is_search()
    }

    /// Linear or binary search
    pub fn is_search(self) -> bool {
        matches!(self, Algorithm::LinearSearch | Algorithm::BinarySearch)
    }

    fn depth_order(self) -> Option<DepthOrder> {
        match self {
            Algorithm::PreOrder => Some(DepthOrder::Pre),
            Algorithm::InOrder => Some(DepthOrder::In),
            Algorithm::PostOrder => Some(DepthOrder::Post),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" | "level-order" => Ok(Algorithm::BreadthFirst),
            "dfs-pre" | "pre-order" | "preorder" => Ok(Algorithm::PreOrder),
            "dfs-in" | "in-order" | "inorder" => Ok(Algorithm::InOrder),
            "dfs-post" | "post-order" | "postorder" => Ok(Algorithm::PostOrder),
            "lin" | "linear" | "linear-search" => Ok(Algorithm::LinearSearch),
            "bin" | "binary" | "binary-search" => Ok(Algorithm::BinarySearch),
            _ => Err(VisualizerError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Shared cursor over any algorithm's visit sequence
#[derive(Debug, Clone)]
pub enum Traversal {
    /// Level-order walk
    BreadthFirst(BreadthFirst<Arc<[Slot]>>),
    /// Pre/in/post-order walk
    DepthFirst(DepthFirst<Arc<[Slot]>>),
    /// Flat scan
    Linear(LinearScan<Arc<[Slot]>>),
    /// Midpoint probing
    Binary(BinarySearch),
}

impl Iterator for Traversal {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Traversal::BreadthFirst(walk) => walk.next(),
            Traversal::DepthFirst(walk) => walk.next(),
            Traversal::Linear(scan) => scan.next(),
            Traversal::Binary(search) => search.next(),
        }
    }
}

/// A ready-to-drive traversal and the snapshot it reads
#[derive(Debug, Clone)]
pub struct Plan {
    /// Array the yielded indices refer to
    pub source: Arc<[Slot]>,
    /// Visit sequence
    pub cursor: Traversal,
    /// Binary search replaced the source with a sorted copy
    pub sorted: bool,
}

/// Build the visit sequence for `algorithm` over `slots`.
///
/// Tree traversals start at the root. Binary search validates and sorts
/// first; that is the only way this fails.
pub fn plan(
    algorithm: Algorithm,
    slots: &[Slot],
    target: Option<&Target>,
) -> Result<Plan, TraversalError> {
    if algorithm == Algorithm::BinarySearch {
        let sorted = BinarySearch::prepare(slots)?;
        let source: Arc<[Slot]> = sorted.iter().map(|&n| Some(Element::Number(n))).collect();
        return Ok(Plan {
            source,
            cursor: Traversal::Binary(BinarySearch::new(sorted, target)),
            sorted: true,
        });
    }

    let source: Arc<[Slot]> = Arc::from(slots);
    let cursor = match algorithm {
        Algorithm::BreadthFirst => Traversal::BreadthFirst(BreadthFirst::new(Arc::clone(&source), 0)),
        Algorithm::LinearSearch => Traversal::Linear(LinearScan::new(Arc::clone(&source))),
        _ => {
            let order = algorithm.depth_order().unwrap_or(DepthOrder::Pre);
            Traversal::DepthFirst(DepthFirst::new(Arc::clone(&source), 0, order))
        }
    };
    Ok(Plan {
        source,
        cursor,
        sorted: false,
    })
}

/// Breadth-first visit sequence from `start`
pub fn breadth_first<S: AsRef<[Slot]>>(slots: S, start: usize) -> BreadthFirst<S> {
    BreadthFirst::new(slots, start)
}

/// Pre-order visit sequence from `start`
pub fn pre_order<S: AsRef<[Slot]>>(slots: S, start: usize) -> DepthFirst<S> {
    DepthFirst::new(slots, start, DepthOrder::Pre)
}

/// In-order visit sequence from `start`
pub fn in_order<S: AsRef<[Slot]>>(slots: S, start: usize) -> DepthFirst<S> {
    DepthFirst::new(slots, start, DepthOrder::In)
}

/// Post-order visit sequence from `start`
pub fn post_order<S: AsRef<[Slot]>>(slots: S, start: usize) -> DepthFirst<S> {
    DepthFirst::new(slots, start, DepthOrder::Post)
}

/// Linear scan over every present slot
pub fn linear<S: AsRef<[Slot]>>(slots: S) -> LinearScan<S> {
    LinearScan::new(slots)
}
