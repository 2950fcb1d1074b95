//! Spatial Index Module
//!
//! R-tree over laid-out node boxes, used by [`MemoryHost`](crate::host::memory::MemoryHost)
//! to answer `elements_from_point` without walking the whole tree on every pointer move.
//! Entries carry their paint order so point queries come back topmost first.

use crate::geometry::{Point, Rect};
use crate::host::NodeId;
use rstar::{AABB, RTree, RTreeObject};

/// A laid-out node box plus its paint order.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub node: NodeId,
    /// Higher paints later, i.e. on top
    pub z: u32,
    /// Visible part of the box after clipping by scroll containers
    pub clip: Rect,
}

impl SpatialEntry {
    pub fn new(node: NodeId, z: u32, clip: Rect) -> Self {
        Self { node, z, clip }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.clip.left(), self.clip.top()],
            [self.clip.right(), self.clip.bottom()],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

/// Rebuilt in bulk after every relayout; trees here are small and mutations coarse.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = SpatialEntry>,
    {
        self.tree = RTree::bulk_load(entries.into_iter().collect());
    }

    /// Nodes whose clipped box contains `point`, topmost first.
    pub fn query_point(&self, point: Point) -> Vec<NodeId> {
        let envelope = AABB::from_point([point.x, point.y]);
        let mut hits: Vec<&SpatialEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.clip.contains_point(point))
            .collect();
        hits.sort_by(|a, b| b.z.cmp(&a.z));
        hits.into_iter().map(|entry| entry.node).collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }
}
