//! Engine entry point: one sortable container and its drag session.
//!
//! [`Sortable::attach`] finds the container, subscribes to input and returns the engine.
//! The host then routes every subscribed input event to [`Sortable::handle_event`], every
//! fired timer to [`Sortable::handle_timer`] and every requested frame to
//! [`Sortable::handle_frame`]. [`Sortable::destroy`] unsubscribes and rolls back an
//! in-flight drag.

use crate::config::{SelectorSet, SortConfig};
use crate::error::SortResult;
use crate::events::{DragEndEvent, DragStartEvent, Notifier, Subscription};
use crate::frame::FrameSlot;
use crate::geometry::Point;
use crate::host::{Host, ListenerId, ListenerTarget, NodeId};
use crate::input::{DragSession, EventKind, InputEvent, PointerPhase, SessionPhase, SessionState};
use tracing::{debug, info};

/// What the engine did with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not relevant to the engine
    Ignored,
    /// Consumed
    Handled,
    /// Consumed; the host should suppress its default action (text selection, touch scrolling)
    PreventDefault,
}

impl EventOutcome {
    pub fn prevents_default(self) -> bool {
        self == Self::PreventDefault
    }

    pub fn is_ignored(self) -> bool {
        self == Self::Ignored
    }
}

pub struct Sortable {
    pub(crate) config: SortConfig,
    pub(crate) selectors: SelectorSet,
    pub(crate) container: NodeId,
    pub(crate) state: SessionState,
    pub(crate) ghost_frame: FrameSlot<Point>,
    pub(crate) notifier: Notifier,
    listeners: Vec<ListenerId>,
    destroyed: bool,
}

impl Sortable {
    /// Attach to the first node matching `config.container_selector`.
    ///
    /// Returns `Ok(None)` when no container exists; that is not an error. Invalid
    /// selectors or numeric options are.
    pub fn attach<H: Host>(host: &mut H, config: SortConfig) -> SortResult<Option<Self>> {
        let selectors = config.validate()?;
        let container = host.query_selector(&selectors.container);
        Ok(Self::start(host, config, selectors, container))
    }

    /// Attach to a specific container node.
    pub fn attach_to<H: Host>(
        host: &mut H,
        config: SortConfig,
        container: NodeId,
    ) -> SortResult<Option<Self>> {
        let selectors = config.validate()?;
        let container = Some(container).filter(|&node| host.is_attached(node));
        Ok(Self::start(host, config, selectors, container))
    }

    fn start<H: Host>(
        host: &mut H,
        config: SortConfig,
        selectors: SelectorSet,
        container: Option<NodeId>,
    ) -> Option<Self> {
        let Some(container) = container else {
            debug!(selector = %selectors.container, "No container found, sortable not started");
            return None;
        };

        let mut listeners = Vec::with_capacity(EventKind::PRESS.len() + EventKind::DOCUMENT.len());
        for kind in EventKind::PRESS {
            listeners.push(host.add_listener(ListenerTarget::Node(container), kind));
        }
        for kind in EventKind::DOCUMENT {
            listeners.push(host.add_listener(ListenerTarget::Document, kind));
        }

        info!(
            container = %container,
            item_selector = %selectors.item,
            handle = selectors.handle.is_some(),
            "Sortable attached"
        );
        Some(Self {
            config,
            selectors,
            container,
            state: SessionState::default(),
            ghost_frame: FrameSlot::new(),
            notifier: Notifier::new(),
            listeners,
            destroyed: false,
        })
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Active drag, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.state.session()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether a ghost update is waiting for the next frame.
    pub fn has_pending_frame(&self) -> bool {
        self.ghost_frame.is_pending()
    }

    pub fn on_drag_start(&mut self, callback: impl FnMut(&DragStartEvent) + 'static) -> Subscription {
        self.notifier.on_drag_start(callback)
    }

    pub fn on_drag_end(&mut self, callback: impl FnMut(&DragEndEvent) + 'static) -> Subscription {
        self.notifier.on_drag_end(callback)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.notifier.unsubscribe(subscription)
    }

    /// Route one input event through the session state machine.
    pub fn handle_event<H: Host>(&mut self, host: &mut H, event: &InputEvent) -> SortResult<EventOutcome> {
        if self.destroyed {
            return Ok(EventOutcome::Ignored);
        }
        match event.phase() {
            PointerPhase::Start => self.handle_press(host, event),
            PointerPhase::Move => self.handle_move(host, event),
            PointerPhase::End => Ok(self.handle_release(host)),
        }
    }

    /// Stop listening and return the tree to its pre-drag shape. No `dragEnd` is emitted
    /// for a drag cut short here. Safe to call more than once.
    pub fn destroy<H: Host>(&mut self, host: &mut H) {
        match self.state.take() {
            SessionState::Idle => {}
            SessionState::Pending(press) => host.clear_timeout(press.timer),
            SessionState::Dragging(session) => self.roll_back(host, session),
        }
        for listener in self.listeners.drain(..) {
            host.remove_listener(listener);
        }
        self.ghost_frame.discard();

        if !self.destroyed {
            self.destroyed = true;
            info!(container = %self.container, "Sortable destroyed");
        }
    }
}
