//! Engine-wide constants.
//!
//! Centralizes the default configuration values and the thresholds used by the
//! drop target resolver, so tests and the replay tool agree with the engine.

// ============================================================================
// Selector & Class Defaults
// ============================================================================

/// Default selector for containers that hold orderable items
pub const DEFAULT_CONTAINER_SELECTOR: &str = ".container";

/// Default selector for draggable items
pub const DEFAULT_ITEM_SELECTOR: &str = ".item";

/// Class added to placeholder clones
pub const DEFAULT_GHOST_CLASS: &str = "item-ghost";

/// Class added to the real item while it is being dragged
pub const DEFAULT_DRAGGING_CLASS: &str = "item-dragging";

/// Class added to the clone that follows the pointer
pub const DEFAULT_CLONE_CLASS: &str = "item-clone";

// ============================================================================
// Timing
// ============================================================================

/// Press duration in milliseconds before a press becomes a drag
pub const DEFAULT_DRAG_DELAY_MS: u64 = 100;

// ============================================================================
// Autoscroll
// ============================================================================

/// Distance in pixels from a container edge that triggers scrolling
pub const DEFAULT_SCROLL_THRESHOLD: f32 = 50.0;

/// Pixels scrolled per pointer move inside the threshold band
pub const DEFAULT_SCROLL_SPEED: f32 = 10.0;

// ============================================================================
// Drop Target Resolution
// ============================================================================

/// Vertical percentage below which the placeholder goes before the hovered item.
///
/// Strict `< 51`, so a pointer exactly on the midline still resolves to "before".
pub const BEFORE_THRESHOLD_PERCENT: f32 = 51.0;

// ============================================================================
// Profiling
// ============================================================================

/// Budget for one pointer-move turn (scroll + resolve) in milliseconds
pub const MOVE_BUDGET_MS: f64 = 4.0;
