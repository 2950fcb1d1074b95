//! In-memory host environment.
//!
//! An arena of element nodes with just enough layout to make drag sessions behave the
//! way they do on a real page:
//!
//! - Children stack vertically inside their parent and take its full width.
//! - A node with an explicit frame is placed at that frame, scrolls its content and clips
//!   its descendants.
//! - Nodes placed with `set_position` (the ghost) are absolutely positioned and paint on top.
//! - Classes registered as `pointer-events: none` in the [`StyleSheet`] make a node and its
//!   subtree invisible to hit testing.
//!
//! Layout is recomputed after every structural change and hit testing goes through the
//! R-tree in [`SpatialIndex`]. Timers run on a virtual clock advanced by the caller, and
//! frame requests are a single flag the caller drains.

use crate::error::HostError;
use crate::geometry::{Point, Rect};
use crate::host::{
    DebugOverlay, DropProbe, EventSource, Geometry, InsertPosition, ListenerId, ListenerTarget,
    NodeId, NodeTree, Scheduler, TimerId,
};
use crate::input::EventKind;
use crate::selector::{Selector, SelectorSubject};
use crate::spatial_index::{SpatialEntry, SpatialIndex};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::trace;

/// Classes that opt a subtree out of hit testing.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    pointer_events_none: BTreeSet<String>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StyleSheet::add_pointer_events_none`].
    pub fn pointer_events_none(mut self, class: &str) -> Self {
        self.add_pointer_events_none(class);
        self
    }

    pub fn add_pointer_events_none(&mut self, class: &str) {
        self.pointer_events_none.insert(class.to_string());
    }

    fn is_inert(&self, node: &MemNode) -> bool {
        node.classes.iter().any(|class| self.pointer_events_none.contains(class))
    }
}

#[derive(Debug, Clone)]
struct MemNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    label: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Intrinsic height; a node is at least as tall as its flow children
    height: f32,
    /// Width for absolutely positioned nodes
    width: Option<f32>,
    frame: Option<Rect>,
    position: Option<Point>,
    scroll_top: f32,
    layout: Option<Rect>,
}

impl MemNode {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            label: None,
            parent: None,
            children: Vec::new(),
            height: 0.0,
            width: None,
            frame: None,
            position: None,
            scroll_top: 0.0,
            layout: None,
        }
    }

    fn in_flow(&self) -> bool {
        self.frame.is_none() && self.position.is_none()
    }
}

impl SelectorSubject for MemNode {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Per-relayout bookkeeping.
struct LayoutPass {
    z: u32,
    entries: Vec<SpatialEntry>,
    deferred: Vec<NodeId>,
}

/// Arena-backed host used by tests and the replay tool.
pub struct MemoryHost {
    nodes: Vec<MemNode>,
    body: NodeId,
    viewport: Rect,
    style: StyleSheet,
    index: SpatialIndex,
    clock: Duration,
    timers: BTreeMap<TimerId, Duration>,
    next_timer: u64,
    frame_requested: bool,
    frame_requests: u64,
    listeners: BTreeMap<ListenerId, (ListenerTarget, EventKind)>,
    next_listener: u64,
    probe: Option<DropProbe>,
    probe_history: Vec<DropProbe>,
}

impl MemoryHost {
    /// Create a host whose body covers `viewport`.
    pub fn new(viewport: Rect) -> Self {
        let mut body = MemNode::new("body");
        body.frame = Some(viewport);
        let mut host = Self {
            nodes: vec![body],
            body: NodeId(0),
            viewport,
            style: StyleSheet::default(),
            index: SpatialIndex::new(),
            clock: Duration::ZERO,
            timers: BTreeMap::new(),
            next_timer: 1,
            frame_requested: false,
            frame_requests: 0,
            listeners: BTreeMap::new(),
            next_listener: 1,
            probe: None,
            probe_history: Vec::new(),
        };
        host.relayout();
        host
    }

    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = style;
        self.relayout();
        self
    }

    pub fn style_mut(&mut self) -> &mut StyleSheet {
        &mut self.style
    }

    /// Re-run layout after editing the style sheet through [`MemoryHost::style_mut`].
    pub fn refresh(&mut self) {
        self.relayout();
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    // ------------------------------------------------------------------------
    // Building
    // ------------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(MemNode::new(tag));
        id
    }

    /// Create a detached element with classes and an intrinsic height.
    pub fn element(&mut self, tag: &str, classes: &[&str], height: f32) -> NodeId {
        let id = self.create_element(tag);
        let node = &mut self.nodes[id.0 as usize];
        node.classes = classes.iter().map(|c| (*c).to_string()).collect();
        node.height = height;
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
        self.insert(child, parent, InsertPosition::Inside)
    }

    pub fn set_frame(&mut self, node: NodeId, frame: Rect) -> Result<(), HostError> {
        self.node_mut(node)?.frame = Some(frame);
        self.relayout();
        Ok(())
    }

    pub fn set_height(&mut self, node: NodeId, height: f32) -> Result<(), HostError> {
        self.node_mut(node)?.height = height;
        self.relayout();
        Ok(())
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) -> Result<(), HostError> {
        self.node_mut(node)?.id = Some(id.to_string());
        Ok(())
    }

    /// Free-form text used to identify nodes in tests and replay output. Cloned with the node.
    pub fn set_label(&mut self, node: NodeId, label: &str) -> Result<(), HostError> {
        self.node_mut(node)?.label = Some(label.to_string());
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.node(node).ok().and_then(|n| n.label.as_deref())
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.node(node).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    /// Labels of `container`'s children in order; unlabeled children show their tag.
    pub fn labels(&self, container: NodeId) -> Vec<String> {
        self.children(container)
            .into_iter()
            .filter_map(|child| self.node(child).ok())
            .map(|n| n.label.clone().unwrap_or_else(|| n.tag.clone()))
            .collect()
    }

    /// First attached node carrying `label`.
    pub fn find_by_label(&self, label: &str) -> Option<NodeId> {
        self.preorder(self.body)
            .into_iter()
            .find(|&id| self.label(id) == Some(label))
    }

    /// Attached nodes carrying `class`, in document order.
    pub fn attached_with_class(&self, class: &str) -> Vec<NodeId> {
        self.preorder(self.body)
            .into_iter()
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.node(node).ok().and_then(|n| n.position)
    }

    // ------------------------------------------------------------------------
    // Clock, frames, listeners, overlay
    // ------------------------------------------------------------------------

    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Advance the virtual clock and return the timers that fired, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.clock += by;
        let mut due: Vec<(Duration, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, at)| **at <= self.clock)
            .map(|(id, at)| (*at, *id))
            .collect();
        due.sort();
        for (_, id) in &due {
            self.timers.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Drain the frame request flag. Returns true when a frame should run.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Total number of frame requests received.
    pub fn frame_requests(&self) -> u64 {
        self.frame_requests
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listeners_on(&self, target: ListenerTarget) -> Vec<EventKind> {
        self.listeners
            .values()
            .filter(|(t, _)| *t == target)
            .map(|(_, kind)| *kind)
            .collect()
    }

    /// Whether anything listens for `kind` on `target`.
    pub fn is_listening(&self, target: ListenerTarget, kind: EventKind) -> bool {
        self.listeners.values().any(|entry| *entry == (target, kind))
    }

    pub fn current_probe(&self) -> Option<&DropProbe> {
        self.probe.as_ref()
    }

    pub fn probe_history(&self) -> &[DropProbe] {
        &self.probe_history
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn node(&self, id: NodeId) -> Result<&MemNode, HostError> {
        self.nodes.get(id.0 as usize).ok_or(HostError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut MemNode, HostError> {
        self.nodes.get_mut(id.0 as usize).ok_or(HostError::NodeNotFound(id))
    }

    fn preorder(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Ok(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn unlink(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.0 as usize].parent.take() else {
            return;
        };
        self.nodes[parent.0 as usize].children.retain(|&c| c != node);
    }

    fn check_hierarchy(&self, node: NodeId, new_parent: NodeId, reference: NodeId) -> Result<(), HostError> {
        if self.is_inclusive_descendant(new_parent, node) {
            return Err(HostError::HierarchyRequest { child: node, reference });
        }
        Ok(())
    }

    fn flow_height(&self, id: NodeId) -> f32 {
        let node = &self.nodes[id.0 as usize];
        if let Some(frame) = node.frame {
            return frame.height;
        }
        node.height.max(self.content_height(id))
    }

    fn content_height(&self, id: NodeId) -> f32 {
        self.nodes[id.0 as usize]
            .children
            .iter()
            .filter(|c| self.nodes[c.0 as usize].in_flow())
            .map(|&c| self.flow_height(c))
            .sum()
    }

    fn max_scroll(&self, id: NodeId) -> f32 {
        let node = &self.nodes[id.0 as usize];
        match node.frame {
            Some(frame) if id != self.body => (self.content_height(id) - frame.height).max(0.0),
            _ => 0.0,
        }
    }

    fn relayout(&mut self) {
        for node in &mut self.nodes {
            node.layout = None;
        }

        let mut pass = LayoutPass {
            z: 0,
            entries: Vec::new(),
            deferred: Vec::new(),
        };
        let body = self.body;
        let viewport = self.viewport;
        self.place(body, viewport, Some(viewport), false, &mut pass);

        // Absolutely positioned subtrees paint above the flow, clipped to the viewport only
        let mut i = 0;
        while i < pass.deferred.len() {
            let id = pass.deferred[i];
            let node = &self.nodes[id.0 as usize];
            if let Some(pos) = node.position {
                let width = node.width.unwrap_or(0.0);
                let rect = Rect::from_xywh(pos.x, pos.y, width, self.flow_height(id));
                let inert = self.ancestors_inert(id);
                self.place(id, rect, Some(viewport), inert, &mut pass);
            }
            i += 1;
        }

        trace!(entries = pass.entries.len(), "Relayout");
        self.index.rebuild(pass.entries);
    }

    fn ancestors_inert(&self, id: NodeId) -> bool {
        let mut current = self.nodes[id.0 as usize].parent;
        while let Some(p) = current {
            if self.style.is_inert(&self.nodes[p.0 as usize]) {
                return true;
            }
            current = self.nodes[p.0 as usize].parent;
        }
        false
    }

    fn place(&mut self, id: NodeId, rect: Rect, clip: Option<Rect>, inert: bool, pass: &mut LayoutPass) {
        let inert = inert || self.style.is_inert(&self.nodes[id.0 as usize]);
        self.nodes[id.0 as usize].layout = Some(rect);

        let visible = clip.and_then(|c| rect.intersection(&c));
        pass.z += 1;
        if let (Some(visible), false) = (visible, inert) {
            pass.entries.push(SpatialEntry::new(id, pass.z, visible));
        }

        let node = &self.nodes[id.0 as usize];
        let (child_clip, scroll) = if node.frame.is_some() {
            (visible, node.scroll_top)
        } else {
            (clip, 0.0)
        };
        let children = node.children.clone();

        let mut cursor = rect.y - scroll;
        for child in children {
            let child_node = &self.nodes[child.0 as usize];
            if child_node.position.is_some() {
                pass.deferred.push(child);
                continue;
            }
            if let Some(frame) = child_node.frame {
                self.place(child, frame, child_clip, inert, pass);
                continue;
            }
            let height = self.flow_height(child);
            let child_rect = Rect::from_xywh(rect.x, cursor, rect.width, height);
            cursor += height;
            self.place(child, child_rect, child_clip, inert, pass);
        }
    }

    fn clone_subtree(&mut self, source: NodeId) -> NodeId {
        let mut copy = self.nodes[source.0 as usize].clone();
        copy.parent = None;
        copy.width = copy.width.or(copy.layout.map(|r| r.width));
        copy.layout = None;
        let children = std::mem::take(&mut copy.children);

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(copy);
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.nodes[child_copy.0 as usize].parent = Some(id);
            self.nodes[id.0 as usize].children.push(child_copy);
        }
        id
    }
}

impl NodeTree for MemoryHost {
    fn body(&self) -> NodeId {
        self.body
    }

    fn query_selector(&self, selector: &Selector) -> Option<NodeId> {
        self.preorder(self.body)
            .into_iter()
            .find(|&id| self.matches(id, selector))
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.node(node).map(|n| selector.matches(n)).unwrap_or(false)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).ok().and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.node(node).is_ok() && self.is_inclusive_descendant(node, self.body)
    }

    fn clone_node(&mut self, node: NodeId) -> Result<NodeId, HostError> {
        self.node(node)?;
        Ok(self.clone_subtree(node))
    }

    fn insert(&mut self, node: NodeId, reference: NodeId, position: InsertPosition) -> Result<(), HostError> {
        self.node(node)?;
        self.node(reference)?;

        let parent = match position {
            InsertPosition::Inside => reference,
            InsertPosition::Before | InsertPosition::After => {
                self.parent(reference).ok_or(HostError::Detached(reference))?
            }
        };
        self.check_hierarchy(node, parent, reference)?;

        self.unlink(node);
        let siblings = &self.nodes[parent.0 as usize].children;
        let index = match position {
            InsertPosition::Inside => siblings.len(),
            InsertPosition::Before | InsertPosition::After => {
                let at = siblings
                    .iter()
                    .position(|&c| c == reference)
                    .ok_or(HostError::Detached(reference))?;
                if position == InsertPosition::After { at + 1 } else { at }
            }
        };
        self.nodes[parent.0 as usize].children.insert(index, node);
        self.nodes[node.0 as usize].parent = Some(parent);
        self.relayout();
        Ok(())
    }

    fn replace_with(&mut self, old: NodeId, replacement: NodeId) -> Result<(), HostError> {
        self.node(replacement)?;
        let parent = self.node(old)?.parent.ok_or(HostError::Detached(old))?;
        if old == replacement {
            return Ok(());
        }
        self.check_hierarchy(replacement, parent, old)?;

        self.unlink(replacement);
        let siblings = &mut self.nodes[parent.0 as usize].children;
        let index = siblings
            .iter()
            .position(|&c| c == old)
            .ok_or(HostError::Detached(old))?;
        siblings[index] = replacement;
        self.nodes[old.0 as usize].parent = None;
        self.nodes[replacement.0 as usize].parent = Some(parent);
        self.relayout();
        Ok(())
    }

    fn detach(&mut self, node: NodeId) -> Result<(), HostError> {
        self.node(node)?;
        if self.nodes[node.0 as usize].parent.is_some() {
            self.unlink(node);
            self.relayout();
        }
        Ok(())
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), HostError> {
        let n = self.node_mut(node)?;
        if !n.has_class(class) {
            n.classes.push(class.to_string());
            self.relayout();
        }
        Ok(())
    }

    fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), HostError> {
        let n = self.node_mut(node)?;
        let before = n.classes.len();
        n.classes.retain(|c| c != class);
        if n.classes.len() != before {
            self.relayout();
        }
        Ok(())
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).map(|n| n.has_class(class)).unwrap_or(false)
    }
}

impl Geometry for MemoryHost {
    fn elements_from_point(&self, point: Point) -> Vec<NodeId> {
        self.index.query_point(point)
    }

    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        if !self.is_attached(node) {
            return None;
        }
        self.node(node).ok().and_then(|n| n.layout)
    }

    fn scroll_top(&self, node: NodeId) -> f32 {
        self.node(node).map(|n| n.scroll_top).unwrap_or(0.0)
    }

    fn set_scroll_top(&mut self, node: NodeId, value: f32) {
        if self.node(node).is_err() {
            return;
        }
        let clamped = value.clamp(0.0, self.max_scroll(node));
        let n = &mut self.nodes[node.0 as usize];
        if n.scroll_top != clamped {
            n.scroll_top = clamped;
            self.relayout();
        }
    }

    fn set_position(&mut self, node: NodeId, point: Point) -> Result<(), HostError> {
        self.node_mut(node)?.position = Some(point);
        self.relayout();
        Ok(())
    }
}

impl Scheduler for MemoryHost {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.insert(id, self.clock + delay);
        id
    }

    fn clear_timeout(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }

    fn request_animation_frame(&mut self) {
        self.frame_requested = true;
        self.frame_requests += 1;
    }
}

impl EventSource for MemoryHost {
    fn add_listener(&mut self, target: ListenerTarget, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, (target, kind));
        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }
}

impl DebugOverlay for MemoryHost {
    fn show_drop_probe(&mut self, probe: &DropProbe) {
        self.probe = Some(*probe);
        self.probe_history.push(*probe);
    }

    fn clear_drop_probe(&mut self) {
        self.probe = None;
    }
}
