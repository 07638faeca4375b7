//! Traversals over the array-encoded binary tree
//!
//! No tree is materialized. Children of `i` live at `2i+1` and `2i+2`; a slot
//! that is out of range or empty ends that branch.
//!
//! Depth-first orders share one explicit stack of path tokens instead of
//! recursion, so every traversal is a plain resumable iterator.

use std::collections::VecDeque;

use bitvec::prelude::*;

use crate::model::Slot;

/// Left child index, `None` on overflow
#[inline]
pub fn left_child(index: usize) -> Option<usize> {
    index.checked_mul(2)?.checked_add(1)
}

/// Right child index, `None` on overflow
#[inline]
pub fn right_child(index: usize) -> Option<usize> {
    index.checked_mul(2)?.checked_add(2)
}

/// Parent index (root has none)
#[inline]
pub fn parent(index: usize) -> Option<usize> {
    index.checked_sub(1).map(|i| i / 2)
}

/// Depth of `index` below the root (root = 0)
pub fn depth(index: usize) -> usize {
    (u128::BITS - 1 - (index as u128 + 1).leading_zeros()) as usize
}

/// Is there a node at `index`?
#[inline]
pub fn is_present(slots: &[Slot], index: usize) -> bool {
    matches!(slots.get(index), Some(Some(_)))
}

/// Level-order traversal
///
/// Children are queued unconditionally; range and presence are checked when
/// an index is popped.
#[derive(Debug, Clone)]
pub struct BreadthFirst<S> {
    slots: S,
    frontier: VecDeque<usize>,
    seen: BitVec,
}

impl<S: AsRef<[Slot]>> BreadthFirst<S> {
    /// Start a level-order walk at `start`
    pub fn new(slots: S, start: usize) -> Self {
        let len = slots.as_ref().len();
        Self {
            slots,
            frontier: VecDeque::from([start]),
            seen: bitvec![0; len],
        }
    }
}

impl<S: AsRef<[Slot]>> Iterator for BreadthFirst<S> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(index) = self.frontier.pop_front() {
            if !is_present(self.slots.as_ref(), index) || self.seen[index] {
                continue;
            }
            self.seen.set(index, true);
            self.frontier.extend(left_child(index));
            self.frontier.extend(right_child(index));
            return Some(index);
        }
        None
    }
}

/// When a depth-first walk yields a node relative to its subtrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthOrder {
    /// Node, left subtree, right subtree
    Pre,

    /// Left subtree, node, right subtree
    In,

    /// Left subtree, right subtree, node
    Post,
}

/// Progress marker for one stack level
#[derive(Debug, Clone, Copy, PartialEq)]
enum Direction {
    /// Just entered; no subtree visited yet
    Down,

    /// Left subtree finished (or scheduled)
    Left,

    /// Both subtrees finished (or scheduled)
    Right,
}

/// Stack entry: which node and how far we got below it
#[derive(Debug, Clone, Copy)]
struct PathToken {
    index: usize,
    direction: Direction,
}

/// Depth-first traversal driven by an explicit path stack
///
/// Stack depth equals tree depth of the current node.
#[derive(Debug, Clone)]
pub struct DepthFirst<S> {
    slots: S,
    order: DepthOrder,
    path_stack: Vec<PathToken>,
}

impl<S: AsRef<[Slot]>> DepthFirst<S> {
    /// Start a walk in `order` rooted at `start`
    pub fn new(slots: S, start: usize, order: DepthOrder) -> Self {
        let mut walk = Self {
            slots,
            order,
            path_stack: Vec::new(),
        };
        walk.descend(Some(start));
        walk
    }

    fn descend(&mut self, child: Option<usize>) {
        if let Some(index) = child {
            if is_present(self.slots.as_ref(), index) {
                self.path_stack.push(PathToken {
                    index,
                    direction: Direction::Down,
                });
            }
        }
    }
}

impl<S: AsRef<[Slot]>> Iterator for DepthFirst<S> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(&token) = self.path_stack.last() {
            let top = self.path_stack.len() - 1;
            let index = token.index;

            match token.direction {
                Direction::Down => {
                    self.path_stack[top].direction = Direction::Left;
                    self.descend(left_child(index));
                    if self.order == DepthOrder::Pre {
                        return Some(index);
                    }
                }
                Direction::Left => {
                    self.path_stack[top].direction = Direction::Right;
                    self.descend(right_child(index));
                    if self.order == DepthOrder::In {
                        return Some(index);
                    }
                }
                Direction::Right => {
                    self.path_stack.pop();
                    if self.order == DepthOrder::Post {
                        return Some(index);
                    }
                }
            }
        }
        None
    }
}
