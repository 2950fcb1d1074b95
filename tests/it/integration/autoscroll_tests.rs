//! Autoscroll while dragging over a scrollable list.
//!
//! The list is framed at y 100..220 and holds six 40px items (240px of content).

use crate::helpers::{Harness, TestListBuilder};
use dragsort::host::Geometry;
use dragsort::{InsertPosition, Point, Rect};

const FRAME: Rect = Rect::from_xywh(0.0, 100.0, 200.0, 120.0);

fn scrolling_list() -> TestListBuilder {
    TestListBuilder::new().with_framed_list("list", FRAME, &["i0", "i1", "i2", "i3", "i4", "i5"])
}

fn scroll(h: &Harness) -> f32 {
    h.host.scroll_top(h.node("list"))
}

#[test]
fn test_scrolls_down_near_bottom_edge() {
    let mut h = scrolling_list().build();

    h.start_drag("i0", 50.0);
    h.move_to(Point::new(10.0, 215.0));
    assert_eq!(scroll(&h), 10.0);

    h.move_to(Point::new(10.0, 216.0));
    assert_eq!(scroll(&h), 20.0);
}

#[test]
fn test_scrolls_up_near_top_edge() {
    let mut h = scrolling_list().build();
    let list = h.node("list");
    h.host.set_scroll_top(list, 50.0);

    h.start_drag("i2", 50.0);
    h.move_to(Point::new(10.0, 105.0));

    assert_eq!(scroll(&h), 40.0);
}

#[test]
fn test_middle_band_does_not_scroll() {
    let mut h = scrolling_list().build();

    h.start_drag("i0", 50.0);
    h.move_to(Point::new(10.0, 160.0));

    assert_eq!(scroll(&h), 0.0);
}

#[test]
fn test_scroll_clamped_at_top() {
    let mut h = scrolling_list().build();

    h.start_drag("i0", 50.0);
    h.move_to(Point::new(10.0, 105.0));

    assert_eq!(scroll(&h), 0.0);
}

#[test]
fn test_no_scroll_before_drag_starts() {
    let mut h = scrolling_list().build();

    h.press_on("i0", 50.0);
    let outcome = h.move_to(Point::new(10.0, 215.0));

    assert!(outcome.is_ignored());
    assert_eq!(scroll(&h), 0.0);
}

#[test]
fn test_pointer_outside_containers_scrolls_own_container() {
    let mut h = scrolling_list().build();

    h.start_drag("i0", 50.0);
    h.move_to(Point::new(10.0, 500.0));

    assert_eq!(scroll(&h), 10.0);
}

#[test]
fn test_configured_speed() {
    let mut h = scrolling_list()
        .with_config(|c| c.scroll_speed = 25.0)
        .build();

    h.start_drag("i0", 50.0);
    h.move_to(Point::new(10.0, 215.0));

    assert_eq!(scroll(&h), 25.0);
}

#[test]
fn test_scroll_happens_before_resolution() {
    let mut h = scrolling_list().build();

    // Pointer over i2's lower edge; the scroll moves i3 under it before hit testing
    h.start_drag("i0", 50.0);
    h.move_to(Point::new(10.0, 215.0));

    let placeholder = h.sortable.session().unwrap().placeholder.unwrap();
    assert_eq!(placeholder.reference, h.node("i3"));
    assert_eq!(placeholder.position, InsertPosition::Before);
}
