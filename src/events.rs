//! Notifications emitted to the host application.
//!
//! Listeners are plain callbacks registered on the engine. `dragStart` fires when a press
//! is promoted to a drag; `dragEnd` fires after commit or rollback with the final session
//! snapshot. A press released before the drag delay emits nothing.

use crate::geometry::Point;
use crate::host::NodeId;
use crate::input::Slot;
use serde::Serialize;

/// Emitted at drag promotion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStartEvent {
    pub item: NodeId,
    /// `None` when the item's parent is not a container
    pub from_index: Option<usize>,
    pub from_container: Option<NodeId>,
}

/// Emitted once per drag after the tree has settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEndEvent {
    pub item: NodeId,
    /// Container the engine is attached to
    pub container: NodeId,
    pub origin: Option<Slot>,
    /// `None` when nothing was committed (implicit rollback)
    pub destination: Option<Slot>,
    pub start: Point,
    /// Last pointer position observed during the drag
    pub end: Point,
}

impl DragEndEvent {
    /// Whether the item ended up somewhere other than where it started.
    pub fn moved(&self) -> bool {
        self.destination.is_some() && self.destination != self.origin
    }

    pub fn to_index(&self) -> Option<usize> {
        self.destination.map(|slot| slot.index)
    }

    pub fn to_container(&self) -> Option<NodeId> {
        self.destination.map(|slot| slot.container)
    }
}

/// Handle returned by listener registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered set of callbacks for one notification type.
pub struct Listeners<E> {
    callbacks: Vec<(Subscription, Callback<E>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }
}

impl<E> Listeners<E> {
    fn push(&mut self, id: Subscription, callback: Callback<E>) {
        self.callbacks.push((id, callback));
    }

    fn remove(&mut self, subscription: Subscription) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(id, _)| *id != subscription);
        self.callbacks.len() != before
    }

    /// Call every listener in registration order.
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// Listener registries for both notifications, sharing one subscription id space.
#[derive(Default)]
pub struct Notifier {
    next: u64,
    pub drag_start: Listeners<DragStartEvent>,
    pub drag_end: Listeners<DragEndEvent>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> Subscription {
        let id = Subscription(self.next);
        self.next += 1;
        id
    }

    pub fn on_drag_start(&mut self, callback: impl FnMut(&DragStartEvent) + 'static) -> Subscription {
        let id = self.next_id();
        self.drag_start.push(id, Box::new(callback));
        id
    }

    pub fn on_drag_end(&mut self, callback: impl FnMut(&DragEndEvent) + 'static) -> Subscription {
        let id = self.next_id();
        self.drag_end.push(id, Box::new(callback));
        id
    }

    /// Returns false when the subscription is unknown or already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.drag_start.remove(subscription) || self.drag_end.remove(subscription)
    }
}
