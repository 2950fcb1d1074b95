//! In-memory host behaviour relied on by the drag tests.

use crate::helpers::VIEWPORT;
use dragsort::host::memory::StyleSheet;
use dragsort::host::{EventSource, Geometry, NodeTree, Scheduler};
use dragsort::{EventKind, HostError, InsertPosition, ListenerTarget, MemoryHost, Point, Rect};
use std::time::Duration;

fn list(host: &mut MemoryHost, labels: &[&str]) -> dragsort::NodeId {
    let list = host.element("ul", &["container"], 0.0);
    host.append_child(host.body(), list).unwrap();
    for label in labels {
        let item = host.element("li", &["item"], 40.0);
        host.set_label(item, label).unwrap();
        host.append_child(list, item).unwrap();
    }
    list
}

#[test]
fn test_items_stack_in_document_order() {
    let mut host = MemoryHost::new(VIEWPORT);
    let list = list(&mut host, &["a", "b"]);
    let b = host.find_by_label("b").unwrap();

    assert_eq!(host.bounding_rect(list), Some(Rect::from_xywh(0.0, 0.0, 400.0, 80.0)));
    assert_eq!(host.bounding_rect(b), Some(Rect::from_xywh(0.0, 40.0, 400.0, 40.0)));
    assert_eq!(host.elements_from_point(Point::new(5.0, 50.0)), vec![b, list, host.body()]);
}

#[test]
fn test_replace_with_moves_node_across_parents() {
    let mut host = MemoryHost::new(VIEWPORT);
    let first = list(&mut host, &["a", "b"]);
    let second = list(&mut host, &["x"]);
    let a = host.find_by_label("a").unwrap();
    let x = host.find_by_label("x").unwrap();

    let marker = host.clone_node(a).unwrap();
    host.insert(marker, x, InsertPosition::Before).unwrap();
    host.replace_with(marker, a).unwrap();

    assert_eq!(host.labels(first), vec!["b"]);
    assert_eq!(host.labels(second), vec!["a", "x"]);
    assert!(!host.is_attached(marker));
}

#[test]
fn test_insert_relative_to_detached_reference_fails() {
    let mut host = MemoryHost::new(VIEWPORT);
    let orphan = host.create_element("li");
    let node = host.create_element("li");

    let err = host.insert(node, orphan, InsertPosition::After).unwrap_err();
    assert!(matches!(err, HostError::Detached(_)));
}

#[test]
fn test_inert_classes_toggle_hit_testing() {
    let mut host = MemoryHost::new(VIEWPORT).with_style(StyleSheet::new().pointer_events_none("hidden"));
    let list = list(&mut host, &["a"]);
    let a = host.find_by_label("a").unwrap();

    host.add_class(a, "hidden").unwrap();
    assert_eq!(host.elements_from_point(Point::new(5.0, 5.0)), vec![list, host.body()]);

    host.remove_class(a, "hidden").unwrap();
    assert_eq!(host.elements_from_point(Point::new(5.0, 5.0))[0], a);
}

#[test]
fn test_cleared_timer_never_fires() {
    let mut host = MemoryHost::new(VIEWPORT);
    let keep = host.set_timeout(Duration::from_millis(10));
    let cancelled = host.set_timeout(Duration::from_millis(5));

    host.clear_timeout(cancelled);
    assert_eq!(host.advance(Duration::from_millis(20)), vec![keep]);
    assert_eq!(host.now(), Duration::from_millis(20));
}

#[test]
fn test_listener_registry() {
    let mut host = MemoryHost::new(VIEWPORT);
    let id = host.add_listener(ListenerTarget::Document, EventKind::MouseUp);
    host.add_listener(ListenerTarget::Document, EventKind::TouchEnd);

    assert_eq!(
        host.listeners_on(ListenerTarget::Document),
        vec![EventKind::MouseUp, EventKind::TouchEnd]
    );
    host.remove_listener(id);
    assert!(!host.is_listening(ListenerTarget::Document, EventKind::MouseUp));
    assert_eq!(host.listener_count(), 1);
}
