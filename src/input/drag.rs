//! Move handling - ghost frames, autoscroll and drop target resolution.

use crate::autoscroll::{Autoscroll, ScrollNudge};
use crate::constants::MOVE_BUDGET_MS;
use crate::error::SortResult;
use crate::geometry::Point;
use crate::host::{Host, NodeId};
use crate::input::{InputEvent, SessionState};
use crate::perf::ScopedTimer;
use crate::resolver::{DropTargetResolver, Resolution};
use crate::sortable::{EventOutcome, Sortable};
use tracing::{debug, trace};

impl Sortable {
    pub(crate) fn handle_move<H: Host>(
        &mut self,
        host: &mut H,
        event: &InputEvent,
    ) -> SortResult<EventOutcome> {
        if !self.state.is_dragging() {
            return Ok(EventOutcome::Ignored);
        }
        let Some(point) = event.position() else {
            trace!(kind = ?event.kind, "Move without a position ignored");
            return Ok(EventOutcome::Ignored);
        };
        let point = point.sanitized();
        let _timer = ScopedTimer::new("handle_move", MOVE_BUDGET_MS);

        if self.ghost_frame.schedule(point) {
            host.request_animation_frame();
        }
        self.autoscroll(host, point);
        self.resolve_drop_target(host, point)?;
        Ok(EventOutcome::PreventDefault)
    }

    /// Run the coalesced ghost update. Called by the host once per requested frame.
    pub fn handle_frame<H: Host>(&mut self, host: &mut H) {
        let Some(point) = self.ghost_frame.take() else {
            return;
        };
        let Some(ghost) = self.state.session().and_then(|session| session.ghost) else {
            debug!("Frame arrived after the drag ended");
            return;
        };
        if !host.is_attached(ghost) {
            debug!(ghost = %ghost, "Ghost detached, frame skipped");
            return;
        }
        if let Err(err) = host.set_position(ghost, point) {
            debug!(ghost = %ghost, error = %err, "Ghost update skipped");
        }
    }

    /// Hovered container, or the sortable's own container when the pointer is elsewhere.
    pub(crate) fn scroll_target<H: Host>(&self, host: &H, point: Point) -> NodeId {
        host.elements_from_point(point)
            .into_iter()
            .find(|&node| host.matches(node, &self.selectors.container))
            .unwrap_or(self.container)
    }

    fn autoscroll<H: Host>(&mut self, host: &mut H, point: Point) -> ScrollNudge {
        let target = self.scroll_target(host, point);
        Autoscroll::from_config(&self.config).apply(host, target, point.y)
    }

    pub(crate) fn resolve_drop_target<H: Host>(
        &mut self,
        host: &mut H,
        point: Point,
    ) -> SortResult<Resolution> {
        let SessionState::Dragging(session) = &mut self.state else {
            return Ok(Resolution::NoTarget);
        };
        session.pointer = point;
        let resolution = DropTargetResolver::new(&self.selectors, &self.config).resolve(host, session, point)?;
        trace!(?resolution, x = point.x, y = point.y, "Drop target resolved");
        Ok(resolution)
    }
}
