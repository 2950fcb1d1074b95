//! Edge autoscroll.
//!
//! While dragging, a pointer within `scroll_threshold` pixels of the scroll target's top
//! or bottom edge scrolls it by `scroll_speed` pixels per move. Scrolling is per move,
//! not per frame: holding the pointer still does not keep scrolling.

use crate::config::SortConfig;
use crate::geometry::Rect;
use crate::host::{Geometry, NodeId};
use tracing::trace;

/// Direction of one autoscroll step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollNudge {
    None,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autoscroll {
    pub threshold: f32,
    pub speed: f32,
}

impl Autoscroll {
    pub fn new(threshold: f32, speed: f32) -> Self {
        Self { threshold, speed }
    }

    pub fn from_config(config: &SortConfig) -> Self {
        Self::new(config.scroll_threshold, config.scroll_speed)
    }

    /// Which way a pointer at `y` pushes a target occupying `rect`. The top band wins
    /// when the target is too short for the bands not to overlap.
    pub fn nudge_for(&self, rect: Rect, y: f32) -> ScrollNudge {
        if y < rect.top() + self.threshold {
            ScrollNudge::Up
        } else if y > rect.bottom() - self.threshold {
            ScrollNudge::Down
        } else {
            ScrollNudge::None
        }
    }

    /// Scroll `target` one step if `y` sits in an edge band. The host clamps the result.
    pub fn apply<G: Geometry + ?Sized>(&self, host: &mut G, target: NodeId, y: f32) -> ScrollNudge {
        let Some(rect) = host.bounding_rect(target) else {
            return ScrollNudge::None;
        };
        let nudge = self.nudge_for(rect, y);
        let delta = match nudge {
            ScrollNudge::None => return nudge,
            ScrollNudge::Up => -self.speed,
            ScrollNudge::Down => self.speed,
        };
        let before = host.scroll_top(target);
        host.set_scroll_top(target, before + delta);
        trace!(node = %target, ?nudge, before, after = host.scroll_top(target), "Autoscroll");
        nudge
    }
}
