//! End-to-end playback scenarios through the controller

use std::time::Duration;

use stepwise::{
    Algorithm, Controller, Element, RecordingRenderer, RenderEvent, Renderer, SessionState, Step,
    StopHandle, StructureKind,
};
use test_case::test_case;

mod common;
use common::{controller, reachable, slots, sparse};

#[test]
fn linear_search_halts_on_target() {
    let (mut c, _) = controller();
    c.set_structure_mode(StructureKind::LinkedList);
    c.load_text("5, 3, 8, 1");
    c.select_algorithm(Algorithm::LinearSearch);
    c.set_target("8");

    assert_eq!(c.run(), SessionState::Found);

    let r = c.renderer();
    assert_eq!(r.visited(), vec![0, 1, 2]);
    assert_eq!(r.found(), Some((2, Some(&Element::Number(8.0)))));
    assert_eq!(r.last_status(), Some("Found target 8 at index 2"));
    assert_eq!(r.completions(), 0);
}

#[test]
fn binary_search_sorts_then_converges() {
    let (mut c, _) = controller();
    c.load_text("5 3 8 1 4 7 9 0");
    c.select_algorithm(Algorithm::BinarySearch);
    c.set_target("7");

    assert_eq!(c.run(), SessionState::Found);

    assert_eq!(c.sequence().slots(), slots("0 1 3 4 5 7 8 9").as_slice());
    assert_eq!(c.sequence().kind(), StructureKind::LinkedList);

    let r = c.renderer();
    let visited = r.visited();
    assert_eq!(visited.last(), Some(&5));
    assert_eq!(visited, vec![3, 5]);
    assert_eq!(r.found(), Some((5, Some(&Element::Number(7.0)))));
}

#[test]
fn binary_search_rejects_text() {
    let (mut c, delays) = controller();
    c.set_structure_mode(StructureKind::Queue);
    c.load_text("a, b");
    c.select_algorithm(Algorithm::BinarySearch);
    c.set_target("a");

    assert_eq!(c.run(), SessionState::Idle);
    assert_eq!(c.step(), Step::Rejected);

    let r = c.renderer();
    assert!(r.visited().is_empty());
    assert_eq!(
        r.validation_errors(),
        vec!["Binary Search needs numeric, sorted data."; 2]
    );
    assert_eq!(c.sequence().slots(), slots("a b").as_slice());
    assert_eq!(c.sequence().kind(), StructureKind::Queue);
    assert!(delays.borrow().is_empty());
}

#[test_case(Algorithm::BreadthFirst ; "breadth first")]
#[test_case(Algorithm::PreOrder ; "pre order")]
#[test_case(Algorithm::InOrder ; "in order")]
#[test_case(Algorithm::PostOrder ; "post order")]
#[test_case(Algorithm::LinearSearch ; "linear")]
fn step_reports_each_index_then_no_more_steps(algorithm: Algorithm) {
    let tree = sparse(&[Some(1), Some(2), None, Some(4), Some(5), Some(6)]);
    let reachable_count = if algorithm.is_search() { 5 } else { reachable(&tree).len() };
    let extra = 3;

    let (mut c, delays) = controller();
    c.load_slots(tree);
    c.select_algorithm(algorithm);

    let mut indices = Vec::new();
    for _ in 0..reachable_count {
        let step = c.step();
        indices.push(step.index().expect("a visit per step"));
    }
    assert_eq!(c.renderer().visited(), indices);

    let mut sorted = indices.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), reachable_count, "an index repeated");

    assert_eq!(c.step(), Step::Exhausted);
    assert_eq!(c.renderer().last_status(), Some("No more steps"));

    for _ in 0..extra {
        c.renderer_mut().clear();
        assert_eq!(c.step(), Step::Finished(SessionState::Exhausted));
        assert!(c.renderer().visited().is_empty());
        assert_eq!(c.renderer().statuses(), vec!["No more steps"]);
    }
    assert!(delays.borrow().is_empty(), "step mode never pauses");
}

#[test]
fn stop_during_pending_pause_suppresses_visits() {
    let handle = StopHandle::new();
    let remote = handle.clone();
    let mut pauses = 0;
    let pacer = move |_delay: Duration| {
        pauses += 1;
        if pauses == 2 {
            // Cancelled while the timer is pending
            remote.stop();
        }
    };

    let mut c = Controller::with_pacer(RecordingRenderer::default(), pacer).with_stop_handle(handle);
    c.load_text("1 2 3 4 5 6 7");
    assert_eq!(c.run(), SessionState::Stopped);

    let r = c.renderer();
    assert_eq!(r.visited(), vec![0, 1]);
    assert_eq!(r.last_status(), Some("Stopped"));
    assert_eq!(r.completions(), 0);
    assert_eq!(c.state(), SessionState::Stopped);
}

#[test]
fn renderer_can_cancel_through_handle() {
    struct StopAfter {
        inner: RecordingRenderer,
        handle: StopHandle,
        limit: usize,
    }

    impl Renderer for StopAfter {
        fn on_visit(&mut self, index: usize, value: Option<&Element>, label: &str) {
            self.inner.on_visit(index, value, label);
            if self.inner.visited().len() == self.limit {
                self.handle.stop();
            }
        }
        fn on_target_found(&mut self, index: usize, value: Option<&Element>) {
            self.inner.on_target_found(index, value);
        }
        fn on_status(&mut self, message: &str) {
            self.inner.on_status(message);
        }
        fn on_traversal_complete(&mut self) {
            self.inner.on_traversal_complete();
        }
        fn on_validation_error(&mut self, message: &str) {
            self.inner.on_validation_error(message);
        }
    }

    let handle = StopHandle::new();
    let renderer = StopAfter {
        inner: RecordingRenderer::default(),
        handle: handle.clone(),
        limit: 3,
    };
    let mut c = Controller::with_pacer(renderer, |_: Duration| {}).with_stop_handle(handle);
    c.load_text("1 2 3 4 5 6 7");
    c.select_algorithm(Algorithm::PostOrder);

    assert_eq!(c.run(), SessionState::Stopped);
    assert_eq!(c.renderer().inner.visited(), vec![3, 4, 1]);
}

#[test]
fn auto_play_paces_by_speed() {
    let (mut c, delays) = controller();
    c.load_text("1 2 3");
    c.set_speed(2.0);

    assert_eq!(c.run(), SessionState::Exhausted);
    assert_eq!(c.renderer().visited(), vec![0, 1, 2]);
    assert_eq!(c.renderer().completions(), 1);
    assert_eq!(c.renderer().last_status(), Some("Traversal complete"));
    assert_eq!(*delays.borrow(), vec![Duration::from_millis(350); 3]);
}

#[test]
fn found_does_not_pause() {
    let (mut c, delays) = controller();
    c.load_text("1 2 3");
    c.set_target("1");
    assert_eq!(c.run(), SessionState::Found);
    assert!(delays.borrow().is_empty());
}

#[test]
fn run_replaces_step_session() {
    let (mut c, _) = controller();
    c.load_text("1 2 3");
    c.step();
    c.step();
    c.renderer_mut().clear();

    c.run();
    assert_eq!(c.renderer().visited(), vec![0, 1, 2]);
}

#[test]
fn reset_allows_a_fresh_walk() {
    let (mut c, _) = controller();
    c.load_text("1 2 3");
    c.select_algorithm(Algorithm::InOrder);
    c.set_target("2");
    assert_eq!(c.step().index(), Some(1));
    assert_eq!(c.state(), SessionState::Found);
    assert_eq!(c.step(), Step::Finished(SessionState::Found));

    c.reset();
    assert_eq!(c.state(), SessionState::Idle);
    assert_eq!(c.renderer().last_status(), Some("Reset"));
    assert_eq!(c.step().index(), Some(1));
}

#[test]
fn empty_structure_completes_immediately() {
    let (mut c, delays) = controller();
    c.clear();
    assert_eq!(c.run(), SessionState::Exhausted);
    assert!(c.renderer().visited().is_empty());
    assert_eq!(c.renderer().completions(), 1);
    assert!(delays.borrow().is_empty());

    c.select_algorithm(Algorithm::LinearSearch);
    c.run();
    assert_eq!(c.renderer().last_status(), Some("Search complete"));
}

#[test]
fn visit_events_carry_label_and_value() {
    let (mut c, _) = controller();
    c.load_text("pear apple");
    c.select_algorithm(Algorithm::PreOrder);
    c.step();

    let visit = c
        .renderer()
        .events()
        .iter()
        .find(|e| matches!(e, RenderEvent::Visit { .. }))
        .cloned();
    assert_eq!(
        visit,
        Some(RenderEvent::Visit {
            index: 0,
            value: Some(Element::Text("pear".into())),
            label: "Depth-First (Pre-order)".into(),
        })
    );
    assert_eq!(
        c.renderer().last_status(),
        Some("Depth-First (Pre-order) visiting index 0 (value pear)")
    );
}

#[test]
fn binary_search_steps_to_target() {
    let (mut c, delays) = controller();
    c.load_text("5 3 8 1 4 7 9 0");
    c.select_algorithm(Algorithm::BinarySearch);
    c.set_target("7");

    assert_eq!(c.step(), Step::Visit { index: 3, value: Some(Element::Number(4.0)) });
    assert_eq!(c.sequence().slots(), slots("0 1 3 4 5 7 8 9").as_slice());
    assert_eq!(c.sequence().kind(), StructureKind::LinkedList);
    assert_eq!(
        c.session().map(|s| s.source()),
        Some(slots("0 1 3 4 5 7 8 9").as_slice())
    );

    assert_eq!(c.step(), Step::Found { index: 5, value: Some(Element::Number(7.0)) });
    assert_eq!(c.state(), SessionState::Found);
    assert_eq!(c.renderer().last_status(), Some("Found target 7 at index 5"));

    c.renderer_mut().clear();
    assert_eq!(c.step(), Step::Finished(SessionState::Found));
    assert_eq!(c.renderer().statuses(), vec!["No more steps"]);
    assert!(c.renderer().visited().is_empty());
    assert!(delays.borrow().is_empty());
}

#[test]
fn binary_search_with_text_target_narrows_left() {
    let (mut c, _) = controller();
    c.load_text("1 2 3 4 5");
    c.select_algorithm(Algorithm::BinarySearch);
    c.set_target("x");

    assert_eq!(c.run(), SessionState::Exhausted);
    assert_eq!(c.renderer().visited(), vec![2, 0]);
    assert_eq!(c.renderer().last_status(), Some("Search complete"));

    c.reset();
    c.renderer_mut().clear();
    let mut steps = Vec::new();
    loop {
        let step = c.step();
        if step.is_terminal() {
            break;
        }
        steps.extend(step.index());
    }
    assert_eq!(steps, vec![2, 0]);
}

#[test]
fn binary_search_without_target_probes_once() {
    let (mut c, _) = controller();
    c.load_text("4 3 2 1");
    c.select_algorithm(Algorithm::BinarySearch);

    assert_eq!(c.run(), SessionState::Exhausted);
    assert_eq!(c.renderer().visited(), vec![1]);
}

#[test]
fn sorted_order_persists_for_later_traversals() {
    let (mut c, _) = controller();
    c.load_text("3 1 2");
    c.select_algorithm(Algorithm::BinarySearch);
    c.run();

    c.select_algorithm(Algorithm::LinearSearch);
    c.set_target("3");
    assert_eq!(c.run(), SessionState::Found);
    assert_eq!(c.renderer().found().map(|(i, _)| i), Some(2));
}
