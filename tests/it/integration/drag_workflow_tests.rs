//! Drag Workflow Integration Tests

use crate::helpers::{Harness, TestListBuilder, labels};
use dragsort::input::Slot;
use dragsort::{EventKind, InputEvent, SessionPhase};

fn todo() -> Harness {
    TestListBuilder::new().with_list("todo", &["a", "b", "c"]).build()
}

#[test]
fn test_drag_to_end_of_list() {
    let mut h = todo();
    let list = h.node("todo");

    h.start_drag("a", 50.0);
    h.move_over("c", 75.0);
    assert_eq!(h.order("todo"), labels(&["a", "b", "c", "a"]));

    h.release();
    assert_eq!(h.order("todo"), labels(&["b", "c", "a"]));
    assert_eq!(h.sortable.phase(), SessionPhase::Idle);

    let ends = h.ends.borrow();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].item, h.node("a"));
    assert_eq!(ends[0].origin, Some(Slot { container: list, index: 0 }));
    assert_eq!(ends[0].destination, Some(Slot { container: list, index: 2 }));
    assert!(ends[0].moved());
}

#[test]
fn test_drag_to_top_of_list() {
    let mut h = todo();

    h.start_drag("c", 50.0);
    h.move_over("a", 10.0);
    h.release();

    assert_eq!(h.order("todo"), labels(&["c", "a", "b"]));
    assert_eq!(h.ends.borrow()[0].to_index(), Some(0));
}

#[test]
fn test_drop_in_place_is_not_a_move() {
    let mut h = todo();

    h.start_drag("b", 50.0);
    h.move_over("a", 80.0);
    assert_eq!(h.order("todo"), labels(&["a", "b", "b", "c"]));
    h.release();

    assert_eq!(h.order("todo"), labels(&["a", "b", "c"]));
    let end = &h.ends.borrow()[0];
    assert_eq!(end.to_index(), Some(1));
    assert!(!end.moved());
}

#[test]
fn test_release_without_placeholder_leaves_tree_untouched() {
    let mut h = todo();

    h.start_drag("a", 50.0);
    assert!(h.placeholder().is_none());
    h.release();

    assert_eq!(h.order("todo"), labels(&["a", "b", "c"]));
    let ends = h.ends.borrow();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].destination, None);
    assert!(!ends[0].moved());
}

#[test]
fn test_drag_into_empty_list() {
    let mut h = TestListBuilder::new()
        .with_list("todo", &["a", "b", "c"])
        .with_empty_list("done", 60.0)
        .build();
    let done = h.node("done");

    h.start_drag("b", 50.0);
    h.move_over("done", 50.0);
    assert_eq!(h.order("done"), labels(&["b"]));

    h.release();
    assert_eq!(h.order("todo"), labels(&["a", "c"]));
    assert_eq!(h.order("done"), labels(&["b"]));
    let end = &h.ends.borrow()[0];
    assert_eq!(end.destination, Some(Slot { container: done, index: 0 }));
    assert_eq!(end.to_container(), Some(done));
    assert_eq!(end.container, h.node("todo"));
}

#[test]
fn test_drag_between_items_of_another_list() {
    let mut h = TestListBuilder::new()
        .with_list("todo", &["a", "b"])
        .with_list("done", &["x", "y"])
        .build();

    h.start_drag("a", 50.0);
    h.move_over("y", 25.0);
    h.release();

    assert_eq!(h.order("todo"), labels(&["b"]));
    assert_eq!(h.order("done"), labels(&["x", "a", "y"]));
}

#[test]
fn test_drag_start_notification() {
    let mut h = todo();

    h.start_drag("b", 50.0);

    let starts = h.starts.borrow();
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].item, h.node("b"));
    assert_eq!(starts[0].from_index, Some(1));
    assert_eq!(starts[0].from_container, Some(h.node("todo")));
    assert!(h.ends.borrow().is_empty());
}

#[test]
fn test_item_hidden_while_dragging() {
    let mut h = todo();
    let dragging = h.sortable.config().dragging_class.clone();

    h.start_drag("a", 50.0);
    assert!(h.has_class("a", &dragging));

    h.release();
    assert!(!h.has_class("a", &dragging));
}

#[test]
fn test_no_clones_survive_commit() {
    let mut h = todo();

    h.start_drag("a", 50.0);
    h.move_over("c", 75.0);
    assert_eq!(h.clones_in_tree(), 2);

    h.release();
    assert_eq!(h.clones_in_tree(), 0);
    assert!(h.sortable.session().is_none());
}

#[test]
fn test_consecutive_drags() {
    let mut h = todo();

    h.start_drag("a", 50.0);
    h.move_over("c", 75.0);
    h.release();
    assert_eq!(h.order("todo"), labels(&["b", "c", "a"]));

    h.start_drag("a", 50.0);
    h.move_over("b", 10.0);
    h.release();
    assert_eq!(h.order("todo"), labels(&["a", "b", "c"]));

    assert_eq!(h.starts.borrow().len(), 2);
    assert_eq!(h.ends.borrow().len(), 2);
}

#[test]
fn test_touch_drag() {
    let mut h = todo();
    let start = h.point_in("a", 50.0);
    let target = h.node("a");

    let outcome = h
        .sortable
        .handle_event(&mut h.host, &InputEvent::touch(EventKind::TouchStart, Some(target), Some(start)))
        .unwrap();
    assert!(outcome.prevents_default());
    h.hold();

    let over = h.point_in("c", 75.0);
    h.sortable
        .handle_event(&mut h.host, &InputEvent::touch(EventKind::TouchMove, None, Some(over)))
        .unwrap();
    h.sortable
        .handle_event(&mut h.host, &InputEvent::touch(EventKind::TouchEnd, None, None))
        .unwrap();

    assert_eq!(h.order("todo"), labels(&["b", "c", "a"]));
}

#[test]
fn test_touch_cancel_commits() {
    let mut h = todo();

    h.start_drag("a", 50.0);
    h.move_over("c", 75.0);
    h.sortable
        .handle_event(&mut h.host, &InputEvent::touch(EventKind::TouchCancel, None, None))
        .unwrap();

    assert_eq!(h.order("todo"), labels(&["b", "c", "a"]));
    assert_eq!(h.ends.borrow().len(), 1);
}

#[test]
fn test_drag_end_reports_pointer_positions() {
    let mut h = todo();
    let start = h.point_in("a", 50.0);

    h.start_drag("a", 50.0);
    let last = h.point_in("c", 75.0);
    h.move_to(last);
    h.release();

    let end = &h.ends.borrow()[0];
    assert_eq!(end.start, start);
    assert_eq!(end.end, last);
}

#[test]
fn test_drag_with_handles() {
    let mut h = TestListBuilder::new()
        .with_list("todo", &["a", "b", "c"])
        .with_handles()
        .build();

    h.start_drag("a", 25.0);
    h.move_over("c", 75.0);
    h.release();

    assert_eq!(h.order("todo"), labels(&["b", "c", "a"]));
}
