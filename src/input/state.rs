//! Drag session state machine - the single source of truth for one press-drag-drop cycle.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Pending        (qualifying press on an item or its handle)
//! Pending -> Dragging    (press-to-drag timer fires before release)
//! Pending -> Idle        (release before the timer fires; nothing was created)
//! Dragging -> Idle       (release; commit or implicit rollback, then dragEnd)
//! ```
//!
//! Data that only exists while dragging lives inside the `Dragging` variant, so a ghost
//! or placeholder outside a drag is unrepresentable.

use crate::geometry::Point;
use crate::host::{InsertPosition, NodeId, TimerId};
use serde::{Deserialize, Serialize};

/// Observable phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Idle,
    Pending,
    Dragging,
}

/// A container and a child index inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub container: NodeId,
    pub index: usize,
}

/// The engine-owned placeholder and where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub node: NodeId,
    /// Item or container the placeholder was inserted relative to
    pub reference: NodeId,
    pub position: InsertPosition,
}

/// A press waiting for the drag delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPress {
    pub item: NodeId,
    pub start: Point,
    pub timer: TimerId,
}

/// Everything owned or referenced by an active drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Real item; referenced, hidden while dragging, never cloned or destroyed
    pub item: NodeId,
    /// Inert detached clone used as the template for placeholders
    pub snapshot: NodeId,
    /// Clone following the pointer
    pub ghost: Option<NodeId>,
    pub placeholder: Option<Placeholder>,
    pub origin: Option<Slot>,
    pub destination: Option<Slot>,
    pub start: Point,
    /// Last pointer position seen by a move
    pub pointer: Point,
}

impl DragSession {
    pub fn new(item: NodeId, snapshot: NodeId, start: Point) -> Self {
        Self {
            item,
            snapshot,
            ghost: None,
            placeholder: None,
            origin: None,
            destination: None,
            start,
            pointer: start,
        }
    }

    /// Whether `node` is one of the clones this session inserted.
    pub fn owns(&self, node: NodeId) -> bool {
        self.ghost == Some(node) || self.placeholder.map(|p| p.node) == Some(node)
    }
}

/// Session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// No press in progress
    #[default]
    Idle,

    /// Press recorded, waiting for the drag delay
    Pending(PendingPress),

    /// Item is being dragged
    Dragging(DragSession),
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            Self::Idle => SessionPhase::Idle,
            Self::Pending(_) => SessionPhase::Pending,
            Self::Dragging(_) => SessionPhase::Dragging,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Timer of the pending press, if any
    pub fn pending_timer(&self) -> Option<TimerId> {
        match self {
            Self::Pending(press) => Some(press.timer),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            Self::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Item referenced by the press or drag
    pub fn item(&self) -> Option<NodeId> {
        match self {
            Self::Idle => None,
            Self::Pending(press) => Some(press.item),
            Self::Dragging(session) => Some(session.item),
        }
    }

    /// Reset to Idle, returning the previous state
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
