//! Searches over the flat array
//!
//! Both ignore tree shape. Linear scan leaves match detection to the caller;
//! binary search needs the target itself because it steers by comparison.

use std::cmp::Ordering;

use super::TraversalError;
use crate::model::{Element, Slot, Target};

/// Index-order scan over present slots
#[derive(Debug, Clone)]
pub struct LinearScan<S> {
    slots: S,
    cursor: usize,
}

impl<S: AsRef<[Slot]>> LinearScan<S> {
    /// Scan from index 0
    pub fn new(slots: S) -> Self {
        Self { slots, cursor: 0 }
    }
}

impl<S: AsRef<[Slot]>> Iterator for LinearScan<S> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let slots = self.slots.as_ref();
        while self.cursor < slots.len() {
            let index = self.cursor;
            self.cursor += 1;
            if slots[index].is_some() {
                return Some(index);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.as_ref().len().saturating_sub(self.cursor)))
    }
}

/// How probes move the bracket
#[derive(Debug, Clone, Copy, PartialEq)]
enum Steer {
    /// No target: one probe, then stop
    Once,

    /// Numeric target: classic comparison
    Toward(f64),

    /// Textual target never compares below a number; the bracket only shrinks left
    Leftward,
}

/// Midpoint probing over a sorted numeric array
///
/// Bracket is `[lo, end)`; the probe is `⌊(lo + end - 1) / 2⌋`, the classic
/// midpoint of the inclusive `[lo, hi]`.
#[derive(Debug, Clone)]
pub struct BinarySearch {
    sorted: Vec<f64>,
    steer: Steer,
    lo: usize,
    end: usize,
    done: bool,
}

impl BinarySearch {
    /// Validate and sort `slots` for searching.
    ///
    /// Absent slots are dropped first. Any textual element rejects the whole
    /// array with the index it was found at (after dropping gaps).
    pub fn prepare(slots: &[Slot]) -> Result<Vec<f64>, TraversalError> {
        let mut values = Vec::with_capacity(slots.len());
        for (index, element) in slots.iter().flatten().enumerate() {
            match element {
                Element::Number(n) => values.push(*n),
                Element::Text(text) => {
                    return Err(TraversalError::NonNumeric {
                        index,
                        value: text.clone(),
                    })
                }
            }
        }
        values.sort_by(f64::total_cmp);
        Ok(values)
    }

    /// Search `sorted` for `target`.
    ///
    /// Without a target the first midpoint is probed and the search ends.
    /// A textual target never matches, so every probe moves the bracket left.
    pub fn new(sorted: Vec<f64>, target: Option<&Target>) -> Self {
        let end = sorted.len();
        let steer = match target {
            None => Steer::Once,
            Some(Target::Number(n)) => Steer::Toward(*n),
            Some(Target::Text(_)) => Steer::Leftward,
        };
        Self {
            sorted,
            steer,
            lo: 0,
            end,
            done: false,
        }
    }

    /// Remaining bracket as an inclusive range, `None` once exhausted
    pub fn bracket(&self) -> Option<(usize, usize)> {
        (!self.done && self.lo < self.end).then(|| (self.lo, self.end - 1))
    }
}

impl Iterator for BinarySearch {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done || self.lo >= self.end {
            return None;
        }
        let mid = self.lo + (self.end - 1 - self.lo) / 2;

        match self.steer {
            Steer::Once => self.done = true,
            Steer::Leftward => self.end = mid,
            Steer::Toward(target) => match self.sorted[mid].partial_cmp(&target) {
                Some(Ordering::Equal) => self.done = true,
                Some(Ordering::Less) => self.lo = mid + 1,
                Some(Ordering::Greater) | None => self.end = mid,
            },
        }
        Some(mid)
    }
}
