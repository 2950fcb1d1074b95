//! Release handling - commit the drop, cancel a pending press, roll back on teardown.

use crate::events::DragEndEvent;
use crate::host::{Host, NodeId};
use crate::input::{DragSession, SessionState, Slot};
use crate::profile_scope;
use crate::sortable::{EventOutcome, Sortable};
use tracing::{debug, info, warn};

impl Sortable {
    pub(crate) fn handle_release<H: Host>(&mut self, host: &mut H) -> EventOutcome {
        match self.state.take() {
            SessionState::Idle => EventOutcome::Ignored,
            SessionState::Pending(press) => {
                host.clear_timeout(press.timer);
                debug!(item = %press.item, "Released before the drag delay, press cancelled");
                EventOutcome::Handled
            }
            SessionState::Dragging(session) => {
                let event = self.commit(host, session);
                self.notifier.drag_end.emit(&event);
                EventOutcome::Handled
            }
        }
    }

    /// Put the item where the placeholder is, then clear every visual the session created.
    ///
    /// Host failures are logged and downgraded to a rollback: the item stays where it was
    /// and no clone is left behind.
    fn commit<H: Host>(&mut self, host: &mut H, mut session: DragSession) -> DragEndEvent {
        profile_scope!("commit");

        if let Some(placeholder) = session.placeholder
            && host.is_attached(placeholder.node)
        {
            match host.replace_with(placeholder.node, session.item) {
                Ok(()) => {
                    session.placeholder = None;
                    session.destination = slot_of(host, session.item);
                }
                Err(err) => {
                    warn!(item = %session.item, error = %err, "Drop failed, item left in place");
                }
            }
        }

        self.clear_visuals(host, &session);

        let event = DragEndEvent {
            item: session.item,
            container: self.container,
            origin: session.origin,
            destination: session.destination,
            start: session.start,
            end: session.pointer,
        };
        if event.destination.is_some() {
            info!(
                item = %event.item,
                from = ?event.origin.map(|slot| slot.index),
                to = ?event.to_index(),
                "Drag committed"
            );
        } else {
            info!(item = %event.item, "Drag ended without a drop target");
        }
        event
    }

    /// Undo an in-flight drag without notifying anyone.
    pub(crate) fn roll_back<H: Host>(&mut self, host: &mut H, session: DragSession) {
        self.clear_visuals(host, &session);
        debug!(item = %session.item, "Drag rolled back");
    }

    /// Detach the ghost and any placeholder, unhide the item.
    fn clear_visuals<H: Host>(&mut self, host: &mut H, session: &DragSession) {
        let clones = session
            .ghost
            .into_iter()
            .chain(session.placeholder.map(|placeholder| placeholder.node));
        for node in clones {
            if let Err(err) = host.detach(node) {
                warn!(node = %node, error = %err, "Failed to detach drag clone");
            }
        }
        if let Err(err) = host.remove_class(session.item, &self.config.dragging_class) {
            warn!(item = %session.item, error = %err, "Failed to restore dragged item");
        }
        if self.config.debug {
            host.clear_drop_probe();
        }
        self.ghost_frame.discard();
    }
}

/// Parent and index of `node` in the live tree.
fn slot_of<H: Host>(host: &H, node: NodeId) -> Option<Slot> {
    let container = host.parent(node)?;
    let index = host.index_in_parent(node)?;
    Some(Slot { container, index })
}
