//! Host environment contract.
//!
//! The engine never touches a rendering surface directly. It consumes a tree of nodes,
//! their geometry, a timer/frame scheduler and an input subscription registry through
//! the traits below. [`Host`] is the umbrella bound the engine's handlers take.
//!
//! ## Modules
//!
//! - `memory` - arena-backed implementation with block layout and R-tree hit testing

pub mod memory;

use crate::error::{HostError, SortError};
use crate::geometry::{Point, Rect};
use crate::input::EventKind;
use crate::selector::Selector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Identity of a node in the host tree. The engine only ever holds references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle for a scheduled timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Handle for a registered input listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Where an input listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// A specific node (press listeners on the sortable container)
    Node(NodeId),
    /// The document-level input stream (move and release listeners)
    Document,
}

/// Where a node goes relative to a reference node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    /// Immediately before the reference, as its previous sibling
    Before,
    /// Immediately after the reference, as its next sibling
    After,
    /// As the last child of the reference
    #[serde(rename = "in")]
    Inside,
}

impl InsertPosition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Inside => "in",
        }
    }
}

impl FromStr for InsertPosition {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "in" => Ok(Self::Inside),
            other => Err(SortError::InvalidPosition(other.to_string())),
        }
    }
}

impl fmt::Display for InsertPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the resolver computed for the debug overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropProbe {
    pub point: Point,
    /// Item the pointer is over
    pub item: NodeId,
    /// Vertical position inside `item`, in percent of its height
    pub percent: f32,
    pub position: InsertPosition,
}

/// Structural access to the host's node tree.
pub trait NodeTree {
    /// Root that detached visuals (the ghost) are appended to.
    fn body(&self) -> NodeId;

    /// First attached node matching `selector`, in document order.
    fn query_selector(&self, selector: &Selector) -> Option<NodeId>;

    fn matches(&self, node: NodeId, selector: &Selector) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Element children in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Whether `node` is connected to the document.
    fn is_attached(&self, node: NodeId) -> bool;

    /// Deep clone. The clone starts detached.
    fn clone_node(&mut self, node: NodeId) -> Result<NodeId, HostError>;

    /// Move `node` (attached or not) to `position` relative to `reference`.
    fn insert(&mut self, node: NodeId, reference: NodeId, position: InsertPosition) -> Result<(), HostError>;

    /// Put `replacement` where `old` is and detach `old`.
    fn replace_with(&mut self, old: NodeId, replacement: NodeId) -> Result<(), HostError>;

    /// Remove `node` from its parent. Detaching a detached node is a no-op.
    fn detach(&mut self, node: NodeId) -> Result<(), HostError>;

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), HostError>;

    fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), HostError>;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Closest inclusive ancestor matching `selector`.
    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.matches(id, selector) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&child| child == node)
    }
}

/// Geometry queries and visual positioning.
pub trait Geometry {
    /// Nodes whose box contains `point`, topmost first.
    fn elements_from_point(&self, point: Point) -> Vec<NodeId>;

    /// Border box in client coordinates, `None` when the node is not rendered.
    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;

    fn scroll_top(&self, node: NodeId) -> f32;

    /// Hosts clamp the value to the scrollable range.
    fn set_scroll_top(&mut self, node: NodeId, value: f32);

    /// Place a node at absolute client coordinates (left/top).
    fn set_position(&mut self, node: NodeId, point: Point) -> Result<(), HostError>;
}

/// Cooperative time sources.
pub trait Scheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancelling an unknown or already fired timer is a no-op.
    fn clear_timeout(&mut self, timer: TimerId);

    /// Ask for one frame callback; the host calls `Sortable::handle_frame` when it runs.
    fn request_animation_frame(&mut self);
}

/// Input listener registry. The host routes matching events to `Sortable::handle_event`.
pub trait EventSource {
    fn add_listener(&mut self, target: ListenerTarget, kind: EventKind) -> ListenerId;

    fn remove_listener(&mut self, listener: ListenerId);
}

/// Optional visualisation of resolver decisions, only driven when `debug` is on.
pub trait DebugOverlay {
    fn show_drop_probe(&mut self, _probe: &DropProbe) {}

    fn clear_drop_probe(&mut self) {}
}

/// Everything the engine needs from its environment.
pub trait Host: NodeTree + Geometry + Scheduler + EventSource + DebugOverlay {}

impl<T> Host for T where T: NodeTree + Geometry + Scheduler + EventSource + DebugOverlay {}
