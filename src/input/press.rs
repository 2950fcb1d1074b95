//! Press handling - record a pending press, promote it to a drag when the delay elapses.

use crate::error::SortResult;
use crate::events::DragStartEvent;
use crate::host::{Host, InsertPosition, NodeId, TimerId};
use crate::input::{DragSession, InputEvent, PendingPress, SessionState, Slot};
use crate::profile_scope;
use crate::sortable::{EventOutcome, Sortable};
use tracing::{debug, info, trace};

impl Sortable {
    pub(crate) fn handle_press<H: Host>(
        &mut self,
        host: &mut H,
        event: &InputEvent,
    ) -> SortResult<EventOutcome> {
        profile_scope!("handle_press");

        // One session at a time; a second finger or button changes nothing
        if !self.state.is_idle() {
            trace!(phase = ?self.state.phase(), "Press ignored, session active");
            return Ok(EventOutcome::Ignored);
        }

        let Some(target) = event.target else {
            return Ok(EventOutcome::Ignored);
        };
        if !host.is_inclusive_descendant(target, self.container) {
            return Ok(EventOutcome::Ignored);
        }
        let Some(grip) = host.closest(target, self.selectors.press()) else {
            return Ok(EventOutcome::Ignored);
        };
        let Some(item) = host.closest(grip, &self.selectors.item) else {
            return Ok(EventOutcome::Ignored);
        };
        let Some(start) = event.position() else {
            debug!(kind = ?event.kind, "Press without a position ignored");
            return Ok(EventOutcome::Ignored);
        };
        let start = start.sanitized();

        let timer = host.set_timeout(self.config.drag_delay());
        self.state = SessionState::Pending(PendingPress { item, start, timer });
        debug!(item = %item, x = start.x, y = start.y, delay_ms = self.config.drag_delay, "Press recorded");
        Ok(EventOutcome::PreventDefault)
    }

    /// Deliver a fired timer. Only the pending press's own timer promotes it; anything
    /// else (a cancelled or foreign timer) is ignored.
    pub fn handle_timer<H: Host>(&mut self, host: &mut H, timer: TimerId) -> SortResult<()> {
        match self.state {
            SessionState::Pending(press) if press.timer == timer => {
                self.state = SessionState::Idle;
                self.start_drag(host, press)
            }
            _ => {
                trace!(timer = timer.0, "Timer ignored");
                Ok(())
            }
        }
    }

    fn start_drag<H: Host>(&mut self, host: &mut H, press: PendingPress) -> SortResult<()> {
        profile_scope!("start_drag");
        let PendingPress { item, start, .. } = press;

        if !host.is_attached(item) {
            debug!(item = %item, "Pressed item left the tree before the drag started");
            return Ok(());
        }

        let origin = self.slot_in_container(host, item);
        let snapshot = host.clone_node(item)?;
        host.add_class(item, &self.config.dragging_class)?;

        let ghost = host.clone_node(snapshot)?;
        host.add_class(ghost, &self.config.clone_class)?;
        host.set_position(ghost, start)?;
        let body = host.body();
        host.insert(ghost, body, InsertPosition::Inside)?;

        let mut session = DragSession::new(item, snapshot, start);
        session.ghost = Some(ghost);
        session.origin = origin;
        self.state = SessionState::Dragging(session);

        info!(
            item = %item,
            from_index = ?origin.map(|slot| slot.index),
            "Drag started"
        );
        self.notifier.drag_start.emit(&DragStartEvent {
            item,
            from_index: origin.map(|slot| slot.index),
            from_container: origin.map(|slot| slot.container),
        });

        self.resolve_drop_target(host, start)?;
        Ok(())
    }

    /// Parent and index of `item`, when the parent is a container.
    fn slot_in_container<H: Host>(&self, host: &H, item: NodeId) -> Option<Slot> {
        let container = host
            .parent(item)
            .filter(|&parent| host.matches(parent, &self.selectors.container))?;
        let index = host.index_in_parent(item)?;
        Some(Slot { container, index })
    }
}
