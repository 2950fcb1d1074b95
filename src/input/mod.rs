//! Pointer input handling for a sortable container.
//!
//! Mouse and touch events are normalized into three phases (start, move, end) and drive
//! an explicit session state machine (`SessionState`). The handlers are split by phase
//! and all extend [`Sortable`](crate::sortable::Sortable).
//!
//! ## Modules
//!
//! - `pointer` - Raw event types and position normalization
//! - `state` - Session state machine enum and helper methods
//! - `press` - Press handling and promotion to a drag when the delay elapses
//! - `drag` - Move handling (ghost frames, autoscroll, drop target resolution)
//! - `release` - Commit, cancel and rollback

mod drag;
mod pointer;
mod press;
mod release;
mod state;

pub use pointer::{EventKind, InputEvent, PointerPhase, PointerSource, TouchPoint, pointer_position};
pub use state::{DragSession, PendingPress, Placeholder, SessionPhase, SessionState, Slot};
