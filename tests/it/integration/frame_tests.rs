//! Ghost positioning and frame coalescing.

use crate::helpers::TestListBuilder;
use dragsort::Point;
use dragsort::host::NodeTree;

#[test]
fn test_ghost_starts_at_press_point() {
    let mut h = TestListBuilder::new().with_list("todo", &["a", "b"]).build();
    let start = h.point_in("a", 50.0);

    h.start_drag("a", 50.0);

    let ghost = h.ghost().unwrap();
    assert_eq!(h.host.position(ghost), Some(start));
    assert!(h.host.has_class(ghost, &h.sortable.config().clone_class));
}

#[test]
fn test_moves_within_a_frame_coalesce() {
    let mut h = TestListBuilder::new().with_list("todo", &["a", "b"]).build();
    let start = h.point_in("a", 50.0);
    h.start_drag("a", 50.0);
    let ghost = h.ghost().unwrap();

    h.move_to(Point::new(20.0, 30.0));
    h.move_to(Point::new(25.0, 35.0));
    h.move_to(Point::new(30.0, 40.0));

    assert_eq!(h.host.frame_requests(), 1);
    assert_eq!(h.host.position(ghost), Some(start));

    assert!(h.run_frame());
    assert_eq!(h.host.position(ghost), Some(Point::new(30.0, 40.0)));
    assert!(!h.sortable.has_pending_frame());
}

#[test]
fn test_next_move_after_frame_requests_again() {
    let mut h = TestListBuilder::new().with_list("todo", &["a", "b"]).build();
    h.start_drag("a", 50.0);

    h.move_to(Point::new(20.0, 30.0));
    h.run_frame();
    h.move_to(Point::new(21.0, 31.0));

    assert_eq!(h.host.frame_requests(), 2);
}

#[test]
fn test_frame_after_release_is_harmless() {
    let mut h = TestListBuilder::new().with_list("todo", &["a", "b"]).build();
    h.start_drag("a", 50.0);
    h.move_to(Point::new(20.0, 30.0));
    h.release();

    assert!(h.run_frame());
    assert_eq!(h.clones_in_tree(), 0);
}

#[test]
fn test_non_finite_coordinates_become_zero() {
    let mut h = TestListBuilder::new().with_list("todo", &["a", "b"]).build();
    h.start_drag("a", 50.0);
    let ghost = h.ghost().unwrap();

    h.move_to(Point::new(f32::NAN, f32::INFINITY));
    h.run_frame();

    assert_eq!(h.host.position(ghost), Some(Point::new(0.0, 0.0)));
}
