//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestListBuilder` - Builder for a page of sortable lists on a `MemoryHost`
//! - `Harness` - The built page plus an attached `Sortable`, with pointer helpers
//!   that address items by label

use dragsort::host::memory::StyleSheet;
use dragsort::host::{Geometry, NodeTree};
use dragsort::{
    DragEndEvent, DragStartEvent, EventKind, EventOutcome, InputEvent, MemoryHost, NodeId, Point,
    Rect, SortConfig, Sortable,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

pub const ITEM_HEIGHT: f32 = 40.0;
pub const HANDLE_HEIGHT: f32 = 20.0;
pub const VIEWPORT: Rect = Rect::from_xywh(0.0, 0.0, 400.0, 800.0);

struct ListSpec {
    label: String,
    items: Vec<String>,
    min_height: f32,
    frame: Option<Rect>,
}

// ============================================================================
// TestListBuilder - Builder pattern for creating test pages
// ============================================================================

/// Builder for a page of lists stacked top to bottom in the body.
///
/// # Example
/// ```ignore
/// let mut h = TestListBuilder::new()
///     .with_list("todo", &["a", "b", "c"])
///     .with_empty_list("done", 60.0)
///     .build();
/// ```
pub struct TestListBuilder {
    lists: Vec<ListSpec>,
    config: SortConfig,
    handles: bool,
    inert_clones: bool,
}

impl Default for TestListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestListBuilder {
    pub fn new() -> Self {
        Self {
            lists: Vec::new(),
            config: SortConfig::default(),
            handles: false,
            inert_clones: true,
        }
    }

    /// Add a list of 40px items.
    pub fn with_list(self, label: &str, items: &[&str]) -> Self {
        self.with_sized_list(label, items, 0.0)
    }

    /// Add a list at least `min_height` tall, leaving background below its items.
    pub fn with_sized_list(mut self, label: &str, items: &[&str], min_height: f32) -> Self {
        self.lists.push(ListSpec {
            label: label.to_string(),
            items: items.iter().map(|s| (*s).to_string()).collect(),
            min_height,
            frame: None,
        });
        self
    }

    pub fn with_empty_list(self, label: &str, height: f32) -> Self {
        self.with_sized_list(label, &[], height)
    }

    /// Add a scrollable list laid out at `frame`.
    pub fn with_framed_list(mut self, label: &str, frame: Rect, items: &[&str]) -> Self {
        self.lists.push(ListSpec {
            label: label.to_string(),
            items: items.iter().map(|s| (*s).to_string()).collect(),
            min_height: 0.0,
            frame: Some(frame),
        });
        self
    }

    /// Give every item a 20px `.handle` child at its top and restrict presses to it.
    pub fn with_handles(mut self) -> Self {
        self.handles = true;
        self.config.handle_selector = Some(".handle".to_string());
        self
    }

    pub fn with_config(mut self, edit: impl FnOnce(&mut SortConfig)) -> Self {
        edit(&mut self.config);
        self
    }

    /// Leave ghost and dragged item hit-testable.
    pub fn without_inert_clones(mut self) -> Self {
        self.inert_clones = false;
        self
    }

    pub fn build(self) -> Harness {
        let style = if self.inert_clones {
            StyleSheet::new()
                .pointer_events_none(&self.config.clone_class)
                .pointer_events_none(&self.config.dragging_class)
        } else {
            StyleSheet::new()
        };
        let mut host = MemoryHost::new(VIEWPORT).with_style(style);
        let mut nodes = HashMap::new();

        for list in &self.lists {
            let node = host.element("ul", &["container"], list.min_height);
            host.set_label(node, &list.label).unwrap();
            host.append_child(host.body(), node).unwrap();
            if let Some(frame) = list.frame {
                host.set_frame(node, frame).unwrap();
            }
            nodes.insert(list.label.clone(), node);

            for label in &list.items {
                let item = host.element("li", &["item"], ITEM_HEIGHT);
                host.set_label(item, label).unwrap();
                host.append_child(node, item).unwrap();
                if self.handles {
                    let handle = host.element("span", &["handle"], HANDLE_HEIGHT);
                    host.append_child(item, handle).unwrap();
                }
                nodes.insert(label.clone(), item);
            }
        }

        let mut sortable = Sortable::attach(&mut host, self.config)
            .expect("valid config")
            .expect("container present");

        let starts = Rc::new(RefCell::new(Vec::new()));
        let ends = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&starts);
        sortable.on_drag_start(move |e| s.borrow_mut().push(e.clone()));
        let e = Rc::clone(&ends);
        sortable.on_drag_end(move |ev| e.borrow_mut().push(ev.clone()));

        Harness {
            host,
            sortable,
            nodes,
            starts,
            ends,
        }
    }
}

// ============================================================================
// Harness - pointer helpers
// ============================================================================

pub struct Harness {
    pub host: MemoryHost,
    pub sortable: Sortable,
    nodes: HashMap<String, NodeId>,
    pub starts: Rc<RefCell<Vec<DragStartEvent>>>,
    pub ends: Rc<RefCell<Vec<DragEndEvent>>>,
}

impl Harness {
    /// Original node created for `label` (never one of its clones).
    pub fn node(&self, label: &str) -> NodeId {
        *self
            .nodes
            .get(label)
            .unwrap_or_else(|| panic!("no node labelled {label}"))
    }

    /// Labels of the list's children, clones included.
    pub fn order(&self, list: &str) -> Vec<String> {
        self.host.labels(self.node(list))
    }

    /// Point at `percent` of the node's current height, 10px from its left edge.
    pub fn point_in(&self, label: &str, percent: f32) -> Point {
        self.point_in_node(self.node(label), percent)
    }

    pub fn point_in_node(&self, node: NodeId, percent: f32) -> Point {
        let rect = self.host.bounding_rect(node).expect("node is laid out");
        Point::new(rect.x + 10.0, rect.y + rect.height * percent / 100.0)
    }

    pub fn press(&mut self, point: Point) -> EventOutcome {
        let target = self.host.elements_from_point(point).first().copied();
        let event = InputEvent::mouse(EventKind::MouseDown, target, point);
        self.sortable.handle_event(&mut self.host, &event).unwrap()
    }

    pub fn press_on(&mut self, label: &str, percent: f32) -> EventOutcome {
        let point = self.point_in(label, percent);
        self.press(point)
    }

    /// Advance the clock and deliver the timers that fired.
    pub fn wait(&mut self, ms: u64) {
        for timer in self.host.advance(Duration::from_millis(ms)) {
            self.sortable.handle_timer(&mut self.host, timer).unwrap();
        }
    }

    /// Wait out the drag delay.
    pub fn hold(&mut self) {
        let delay = self.sortable.config().drag_delay;
        self.wait(delay + 1);
    }

    /// Press `label` at `percent` and hold until the drag starts.
    pub fn start_drag(&mut self, label: &str, percent: f32) {
        self.press_on(label, percent);
        self.hold();
        assert!(self.sortable.session().is_some(), "drag did not start");
    }

    pub fn move_to(&mut self, point: Point) -> EventOutcome {
        let event = InputEvent::mouse(EventKind::MouseMove, None, point);
        self.sortable.handle_event(&mut self.host, &event).unwrap()
    }

    pub fn move_over(&mut self, label: &str, percent: f32) -> EventOutcome {
        let point = self.point_in(label, percent);
        self.move_to(point)
    }

    pub fn release(&mut self) -> EventOutcome {
        let event = InputEvent::mouse(EventKind::MouseUp, None, Point::default());
        self.sortable.handle_event(&mut self.host, &event).unwrap()
    }

    /// Run a frame if one was requested. Returns whether one ran.
    pub fn run_frame(&mut self) -> bool {
        if self.host.take_frame_request() {
            self.sortable.handle_frame(&mut self.host);
            true
        } else {
            false
        }
    }

    pub fn destroy(&mut self) {
        self.sortable.destroy(&mut self.host);
    }

    pub fn ghost(&self) -> Option<NodeId> {
        self.sortable.session().and_then(|s| s.ghost)
    }

    pub fn placeholder(&self) -> Option<NodeId> {
        self.sortable
            .session()
            .and_then(|s| s.placeholder)
            .map(|p| p.node)
    }

    /// Attached placeholders and ghosts.
    pub fn clones_in_tree(&self) -> usize {
        let config = self.sortable.config();
        self.host.attached_with_class(&config.ghost_class).len()
            + self.host.attached_with_class(&config.clone_class).len()
    }

    pub fn has_class(&self, label: &str, class: &str) -> bool {
        self.host.has_class(self.node(label), class)
    }
}

/// Shorthand for a list of owned labels.
pub fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
