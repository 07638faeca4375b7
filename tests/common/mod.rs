#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use stepwise::{parse_values, Controller, Element, Pacer, RecordingRenderer, Slot};

/// Present slots parsed from free text
pub fn slots(text: &str) -> Vec<Slot> {
    parse_values(text).into_iter().map(Some).collect()
}

/// Slots from optional integers (`None` = gap)
pub fn sparse(values: &[Option<i32>]) -> Vec<Slot> {
    values.iter().map(|v| v.map(Element::from)).collect()
}

/// Pacer that records requested delays instead of sleeping
#[derive(Debug, Clone, Default)]
pub struct RecordingPacer {
    pub delays: Rc<RefCell<Vec<Duration>>>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration) {
        self.delays.borrow_mut().push(delay);
    }
}

/// Controller that never sleeps, plus a view of the delays it asked for
pub fn controller() -> (Controller<RecordingRenderer, RecordingPacer>, Rc<RefCell<Vec<Duration>>>) {
    let pacer = RecordingPacer::default();
    let delays = Rc::clone(&pacer.delays);
    (Controller::with_pacer(RecordingRenderer::default(), pacer), delays)
}

/// Present indices reachable from the root, in ascending order
pub fn reachable(slots: &[Slot]) -> Vec<usize> {
    fn walk(slots: &[Slot], index: usize, out: &mut Vec<usize>) {
        if !matches!(slots.get(index), Some(Some(_))) {
            return;
        }
        out.push(index);
        walk(slots, 2 * index + 1, out);
        walk(slots, 2 * index + 2, out);
    }

    let mut out = Vec::new();
    walk(slots, 0, &mut out);
    out.sort_unstable();
    out
}

/// Recursive reference for the depth-first orders
pub fn reference_order(slots: &[Slot], index: usize, order: &str, out: &mut Vec<usize>) {
    if !matches!(slots.get(index), Some(Some(_))) {
        return;
    }
    if order == "pre" {
        out.push(index);
    }
    reference_order(slots, 2 * index + 1, order, out);
    if order == "in" {
        out.push(index);
    }
    reference_order(slots, 2 * index + 2, order, out);
    if order == "post" {
        out.push(index);
    }
}
