//! Pointer input normalization.
//!
//! Mouse and touch events arrive with different shapes; the engine only ever looks at a
//! phase and, where the phase carries one, a position in host coordinates.

use crate::geometry::Point;
use crate::host::NodeId;
use serde::{Deserialize, Serialize};

/// Raw input event types the engine subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl EventKind {
    /// Listened for on the sortable container.
    pub const PRESS: [EventKind; 2] = [EventKind::MouseDown, EventKind::TouchStart];

    /// Listened for on the document.
    pub const DOCUMENT: [EventKind; 5] = [
        EventKind::MouseMove,
        EventKind::TouchMove,
        EventKind::MouseUp,
        EventKind::TouchEnd,
        EventKind::TouchCancel,
    ];

    pub const fn phase(self) -> PointerPhase {
        match self {
            Self::MouseDown | Self::TouchStart => PointerPhase::Start,
            Self::MouseMove | Self::TouchMove => PointerPhase::Move,
            Self::MouseUp | Self::TouchEnd | Self::TouchCancel => PointerPhase::End,
        }
    }

    pub const fn is_touch(self) -> bool {
        matches!(self, Self::TouchStart | Self::TouchMove | Self::TouchEnd | Self::TouchCancel)
    }
}

/// Unified pointer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

/// One active touch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// Coordinates as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    Mouse { client_x: f32, client_y: f32 },
    Touch { touches: Vec<TouchPoint> },
}

/// A raw input event routed to the engine by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: EventKind,
    /// Node the event was dispatched to; `None` for document-level synthetic events
    pub target: Option<NodeId>,
    pub source: PointerSource,
}

impl InputEvent {
    pub fn mouse(kind: EventKind, target: Option<NodeId>, point: Point) -> Self {
        Self {
            kind,
            target,
            source: PointerSource::Mouse {
                client_x: point.x,
                client_y: point.y,
            },
        }
    }

    /// Touch event with a single active touch point, or none for `TouchEnd`-style events.
    pub fn touch(kind: EventKind, target: Option<NodeId>, point: Option<Point>) -> Self {
        let touches = point
            .map(|p| TouchPoint {
                client_x: p.x,
                client_y: p.y,
            })
            .into_iter()
            .collect();
        Self {
            kind,
            target,
            source: PointerSource::Touch { touches },
        }
    }

    pub fn phase(&self) -> PointerPhase {
        self.kind.phase()
    }

    /// Normalized position; see [`pointer_position`].
    pub fn position(&self) -> Option<Point> {
        pointer_position(&self.source)
    }
}

/// Position in host coordinates. Touch input uses the first active touch point;
/// a touch event with no active points has no position.
pub fn pointer_position(source: &PointerSource) -> Option<Point> {
    match source {
        PointerSource::Mouse { client_x, client_y } => Some(Point::new(*client_x, *client_y)),
        PointerSource::Touch { touches } => touches
            .first()
            .map(|touch| Point::new(touch.client_x, touch.client_y)),
    }
}
