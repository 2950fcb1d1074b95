//! Dragsort - press, drag and drop reordering of items inside visual containers.
//!
//! The crate is a headless engine. Everything it needs from the surrounding UI (a tree of
//! nodes, geometry, timers, frames, input subscriptions) comes in through the traits in
//! [`host`], so the same engine runs against a real rendering surface or the in-memory
//! [`MemoryHost`] used by the tests and the `dragsort-replay` tool.
//!
//! ```ignore
//! let config = SortConfig::default();
//! let Some(mut sortable) = Sortable::attach(&mut host, config)? else {
//!     return Ok(()); // no container on the page
//! };
//! sortable.on_drag_end(|event| println!("moved to {:?}", event.destination));
//! sortable.handle_event(&mut host, &event)?;
//! ```

pub mod autoscroll;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod host;
pub mod input;
pub mod perf;
pub mod replay;
pub mod resolver;
pub mod selector;
pub mod sortable;
pub mod spatial_index;

pub use config::SortConfig;
pub use error::{ConfigError, HostError, SelectorError, SortError, SortResult};
pub use events::{DragEndEvent, DragStartEvent, Subscription};
pub use geometry::{Point, Rect};
pub use host::memory::MemoryHost;
pub use host::{Host, InsertPosition, ListenerId, ListenerTarget, NodeId, TimerId};
pub use input::{EventKind, InputEvent, PointerPhase, PointerSource, SessionPhase, Slot};
pub use selector::Selector;
pub use sortable::{EventOutcome, Sortable};
