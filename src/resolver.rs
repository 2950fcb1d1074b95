//! Drop target resolution.
//!
//! Maps a pointer position to a placeholder location:
//!
//! 1. Hit test; the topmost node matching the item selector is the hovered item and the
//!    topmost node matching the container selector is the hovered container.
//! 2. Hovering one of the session's own clones (ghost or placeholder) changes nothing.
//! 3. An empty hovered container receives the placeholder as its only child.
//! 4. Otherwise the hovered item's upper part (below [`BEFORE_THRESHOLD_PERCENT`] of its
//!    height) places the placeholder before it, the rest after it. Re-resolving to the
//!    same item and side is a no-op.
//! 5. A non-empty container background only appends when
//!    `append_on_container_background` is set.
//!
//! At most one placeholder exists: the previous one is detached before a new one goes in.

use crate::config::{SelectorSet, SortConfig};
use crate::constants::BEFORE_THRESHOLD_PERCENT;
use crate::error::SortResult;
use crate::geometry::Point;
use crate::host::{DropProbe, Host, InsertPosition, NodeId};
use crate::input::{DragSession, Placeholder};
use crate::profile_scope;
use tracing::{debug, trace};

/// Outcome of one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Pointer is over the ghost or the placeholder
    OwnClone,
    /// Placeholder already sits where this position would put it
    Unchanged,
    /// Nothing droppable under the pointer
    NoTarget,
    /// A new placeholder was inserted
    Placed(Placeholder),
}

/// Side of `item` a pointer at `percent` of its height maps to.
pub fn side_for_percent(percent: f32) -> InsertPosition {
    if percent < BEFORE_THRESHOLD_PERCENT {
        InsertPosition::Before
    } else {
        InsertPosition::After
    }
}

pub struct DropTargetResolver<'a> {
    selectors: &'a SelectorSet,
    ghost_class: &'a str,
    debug: bool,
    append_on_background: bool,
}

impl<'a> DropTargetResolver<'a> {
    pub fn new(selectors: &'a SelectorSet, config: &'a SortConfig) -> Self {
        Self {
            selectors,
            ghost_class: &config.ghost_class,
            debug: config.debug,
            append_on_background: config.append_on_container_background,
        }
    }

    pub fn resolve<H: Host + ?Sized>(
        &self,
        host: &mut H,
        session: &mut DragSession,
        point: Point,
    ) -> SortResult<Resolution> {
        profile_scope!("resolve_drop_target");
        let hits = host.elements_from_point(point);
        let item = hits
            .iter()
            .copied()
            .find(|&node| host.matches(node, &self.selectors.item));
        let container = hits
            .iter()
            .copied()
            .find(|&node| host.matches(node, &self.selectors.container));

        if let Some(item) = item
            && session.owns(item)
        {
            trace!(node = %item, "Pointer over own clone");
            return Ok(Resolution::OwnClone);
        }

        if let Some(container) = container
            && host.child_count(container) == 0
        {
            return self.place(host, session, container, InsertPosition::Inside);
        }

        if let Some(item) = item {
            let Some(rect) = host.bounding_rect(item) else {
                return Ok(Resolution::NoTarget);
            };
            let percent = rect.vertical_percent(point.y);
            let position = side_for_percent(percent);
            if self.debug {
                host.show_drop_probe(&DropProbe {
                    point,
                    item,
                    percent,
                    position,
                });
            }
            if session
                .placeholder
                .is_some_and(|p| p.reference == item && p.position == position)
            {
                return Ok(Resolution::Unchanged);
            }
            return self.place(host, session, item, position);
        }

        match container {
            Some(container) if self.append_on_background => {
                if session
                    .placeholder
                    .is_some_and(|p| p.reference == container && p.position == InsertPosition::Inside)
                {
                    return Ok(Resolution::Unchanged);
                }
                self.place(host, session, container, InsertPosition::Inside)
            }
            _ => Ok(Resolution::NoTarget),
        }
    }

    /// Replace the current placeholder with a fresh one at `reference`/`position`.
    fn place<H: Host + ?Sized>(
        &self,
        host: &mut H,
        session: &mut DragSession,
        reference: NodeId,
        position: InsertPosition,
    ) -> SortResult<Resolution> {
        if let Some(old) = session.placeholder.take()
            && host.is_attached(old.node)
        {
            host.detach(old.node)?;
        }

        let node = host.clone_node(session.snapshot)?;
        host.add_class(node, self.ghost_class)?;
        host.insert(node, reference, position)?;

        let placeholder = Placeholder {
            node,
            reference,
            position,
        };
        session.placeholder = Some(placeholder);
        debug!(placeholder = %node, reference = %reference, position = %position, "Placeholder moved");
        Ok(Resolution::Placed(placeholder))
    }
}
