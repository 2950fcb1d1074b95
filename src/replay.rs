//! Scripted drag scenarios against [`MemoryHost`].
//!
//! A scenario is a JSON document describing a page (containers and their items), the
//! engine configuration, and a list of pointer steps. [`run`] plays the steps the way a
//! browser would deliver them: timers fire when the virtual clock passes them and a
//! requested frame runs after each step.
//!
//! ```json
//! {
//!   "config": { "dragDelay": 100 },
//!   "containers": [
//!     { "label": "todo", "items": [ { "label": "a" }, { "label": "b" } ] }
//!   ],
//!   "steps": [
//!     { "action": "press", "x": 10, "y": 5 },
//!     { "action": "wait", "ms": 150 },
//!     { "action": "move", "x": 10, "y": 70 },
//!     { "action": "release" }
//!   ]
//! }
//! ```

use crate::config::SortConfig;
use crate::events::{DragEndEvent, DragStartEvent};
use crate::geometry::{Point, Rect};
use crate::host::memory::{MemoryHost, StyleSheet};
use crate::host::{Geometry, NodeId, NodeTree};
use crate::input::{EventKind, InputEvent, SessionPhase};
use crate::perf::{OperationStats, measure};
use crate::sortable::Sortable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_ITEM_HEIGHT: f32 = 40.0;

fn default_viewport() -> Rect {
    Rect::from_xywh(0.0, 0.0, 800.0, 600.0)
}

fn default_container_classes() -> Vec<String> {
    vec!["container".to_string()]
}

fn default_item_classes() -> Vec<String> {
    vec!["item".to_string()]
}

fn default_item_height() -> f32 {
    DEFAULT_ITEM_HEIGHT
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default = "default_viewport")]
    pub viewport: Rect,
    #[serde(default)]
    pub config: SortConfig,
    /// Classes that ignore hit testing; the clone and dragging classes when absent
    #[serde(default)]
    pub pointer_events_none: Option<Vec<String>>,
    pub containers: Vec<ContainerSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    pub label: String,
    #[serde(default = "default_container_classes")]
    pub classes: Vec<String>,
    /// Minimum height, so an empty container can still be hovered
    #[serde(default)]
    pub height: f32,
    /// Scrollable viewport for the container; stacked in the body when absent
    #[serde(default)]
    pub frame: Option<Rect>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSpec {
    pub label: String,
    #[serde(default = "default_item_classes")]
    pub classes: Vec<String>,
    #[serde(default = "default_item_height")]
    pub height: f32,
}

/// One scripted input.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Step {
    /// Press on whatever is topmost at the point
    Press {
        x: f32,
        y: f32,
        #[serde(default)]
        touch: bool,
    },
    Move {
        x: f32,
        y: f32,
        #[serde(default)]
        touch: bool,
    },
    Release {
        #[serde(default)]
        touch: bool,
    },
    /// `touchcancel`
    Cancel,
    /// Advance the virtual clock, firing due timers
    Wait { ms: u64 },
    Destroy,
}

/// Notification as seen by the replay, with nodes named by label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Notification {
    #[serde(rename_all = "camelCase")]
    DragStart {
        item: String,
        from_index: Option<usize>,
    },
    #[serde(rename_all = "camelCase")]
    DragEnd {
        item: String,
        to_container: Option<String>,
        to_index: Option<usize>,
        moved: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerOrder {
    pub label: String,
    pub items: Vec<String>,
}

/// Result of a replay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub orders: Vec<ContainerOrder>,
    pub notifications: Vec<Notification>,
    #[serde(skip)]
    pub move_timings: OperationStats,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json_str(&contents)
    }

    /// Build the page described by the scenario.
    fn build_host(&self) -> Result<(MemoryHost, Vec<(String, NodeId)>)> {
        let inert = self.pointer_events_none.clone().unwrap_or_else(|| {
            vec![self.config.clone_class.clone(), self.config.dragging_class.clone()]
        });
        let style = inert
            .iter()
            .fold(StyleSheet::new(), |style, class| style.pointer_events_none(class));
        let mut host = MemoryHost::new(self.viewport).with_style(style);

        let mut containers = Vec::with_capacity(self.containers.len());
        for entry in &self.containers {
            let classes: Vec<&str> = entry.classes.iter().map(String::as_str).collect();
            let container = host.element("div", &classes, entry.height);
            host.set_label(container, &entry.label)?;
            let body = host.body();
            host.append_child(body, container)?;
            if let Some(frame) = entry.frame {
                host.set_frame(container, frame)?;
            }
            for item in &entry.items {
                let classes: Vec<&str> = item.classes.iter().map(String::as_str).collect();
                let node = host.element("div", &classes, item.height);
                host.set_label(node, &item.label)?;
                host.append_child(container, node)?;
            }
            containers.push((entry.label.clone(), container));
        }
        Ok((host, containers))
    }
}

enum Recorded {
    Start(DragStartEvent),
    End(DragEndEvent),
}

fn label_of(host: &MemoryHost, node: NodeId) -> String {
    host.label(node).map(str::to_string).unwrap_or_else(|| node.to_string())
}

fn event_kind(phase: EventKind, touch: bool) -> EventKind {
    match (phase, touch) {
        (EventKind::MouseDown, true) => EventKind::TouchStart,
        (EventKind::MouseMove, true) => EventKind::TouchMove,
        (EventKind::MouseUp, true) => EventKind::TouchEnd,
        (kind, _) => kind,
    }
}

fn pointer_event(kind: EventKind, target: Option<NodeId>, point: Option<Point>) -> InputEvent {
    if kind.is_touch() {
        InputEvent::touch(kind, target, point)
    } else {
        InputEvent::mouse(kind, target, point.unwrap_or_default())
    }
}

/// Play `scenario` and report the final container orders.
pub fn run(scenario: &Scenario) -> Result<ReplayReport> {
    let (mut host, containers) = scenario.build_host()?;
    let Some(mut sortable) = Sortable::attach(&mut host, scenario.config.clone())
        .context("Failed to attach sortable")?
    else {
        anyhow::bail!(
            "no container matches {:?}",
            scenario.config.container_selector
        );
    };

    let log: Rc<RefCell<Vec<Recorded>>> = Rc::new(RefCell::new(Vec::new()));
    let starts = Rc::clone(&log);
    sortable.on_drag_start(move |event| starts.borrow_mut().push(Recorded::Start(event.clone())));
    let ends = Rc::clone(&log);
    sortable.on_drag_end(move |event| ends.borrow_mut().push(Recorded::End(event.clone())));

    let mut move_timings = OperationStats::new();
    for (index, step) in scenario.steps.iter().enumerate() {
        debug!(step = index, ?step, "Replay step");
        match *step {
            Step::Press { x, y, touch } => {
                let point = Point::new(x, y);
                let target = host.elements_from_point(point).first().copied();
                let kind = event_kind(EventKind::MouseDown, touch);
                let _ = sortable
                    .handle_event(&mut host, &pointer_event(kind, target, Some(point)))
                    .with_context(|| format!("step {index}: press"))?;
            }
            Step::Move { x, y, touch } => {
                let kind = event_kind(EventKind::MouseMove, touch);
                let event = pointer_event(kind, None, Some(Point::new(x, y)));
                let (outcome, elapsed_ms) = measure(|| sortable.handle_event(&mut host, &event));
                let _ = outcome.with_context(|| format!("step {index}: move"))?;
                move_timings.record(elapsed_ms);
            }
            Step::Release { touch } => {
                let kind = event_kind(EventKind::MouseUp, touch);
                let _ = sortable
                    .handle_event(&mut host, &pointer_event(kind, None, None))
                    .with_context(|| format!("step {index}: release"))?;
            }
            Step::Cancel => {
                let event = InputEvent::touch(EventKind::TouchCancel, None, None);
                let _ = sortable
                    .handle_event(&mut host, &event)
                    .with_context(|| format!("step {index}: cancel"))?;
            }
            Step::Wait { ms } => {
                for timer in host.advance(Duration::from_millis(ms)) {
                    sortable
                        .handle_timer(&mut host, timer)
                        .with_context(|| format!("step {index}: timer"))?;
                }
            }
            Step::Destroy => sortable.destroy(&mut host),
        }
        if host.take_frame_request() {
            sortable.handle_frame(&mut host);
        }
    }

    if sortable.phase() != SessionPhase::Idle {
        warn!(phase = ?sortable.phase(), "Scenario ended mid-session");
    }

    let notifications = log
        .borrow()
        .iter()
        .map(|entry| match entry {
            Recorded::Start(start) => Notification::DragStart {
                item: label_of(&host, start.item),
                from_index: start.from_index,
            },
            Recorded::End(end) => Notification::DragEnd {
                item: label_of(&host, end.item),
                to_container: end.to_container().map(|node| label_of(&host, node)),
                to_index: end.to_index(),
                moved: end.moved(),
            },
        })
        .collect();

    let orders = containers
        .into_iter()
        .map(|(label, node)| ContainerOrder {
            label,
            items: host.labels(node),
        })
        .collect();

    info!(steps = scenario.steps.len(), "Replay finished");
    Ok(ReplayReport {
        orders,
        notifications,
        move_timings,
    })
}
