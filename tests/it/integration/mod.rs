//! Integration tests for dragsort.
//!
//! These drive complete sessions through `Sortable::handle_event` and check the
//! resulting tree, notifications and host side effects.

mod autoscroll_tests;
mod drag_workflow_tests;
mod frame_tests;
