//! Routable street graph with a spatial index for snapping.

use geo::Point;
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use super::components::{StreetEdge, StreetNode};
use crate::{Error, StreetNodeId};

/// Point stored in the R-tree, carrying its graph node index.
#[derive(Debug, Clone, Copy)]
pub struct IndexedPoint {
    x: f64,
    y: f64,
    node: NodeIndex,
}

impl IndexedPoint {
    pub(crate) fn new(point: Point<f64>, node: NodeIndex) -> Self {
        Self {
            x: point.x(),
            y: point.y(),
            node,
        }
    }

    pub fn node(&self) -> NodeIndex {
        self.node
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Street network: a directed graph of nodes and street segments plus an
/// R-tree over node geometry for nearest-node lookups.
#[derive(Debug, Default)]
pub struct StreetGraph {
    pub graph: DiGraph<StreetNode, StreetEdge>,
    rtree: RTree<IndexedPoint>,
    node_ids: HashMap<StreetNodeId, NodeIndex>,
}

impl StreetGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, returning the existing index if the id is already
    /// present. The spatial index is not touched; call
    /// [`StreetGraph::build_index`] once all nodes are inserted.
    pub fn add_node(&mut self, id: StreetNodeId, geometry: Point<f64>) -> NodeIndex {
        match self.node_ids.get(&id) {
            Some(&index) => index,
            None => {
                let index = self.graph.add_node(StreetNode { id, geometry });
                self.node_ids.insert(id, index);
                index
            }
        }
    }

    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, edge: StreetEdge) {
        self.graph.add_edge(source, target, edge);
    }

    /// Rebuilds the spatial index over all current nodes.
    pub fn build_index(&mut self) {
        let points = self
            .graph
            .node_indices()
            .map(|index| IndexedPoint::new(self.graph[index].geometry, index))
            .collect();
        self.rtree = RTree::bulk_load(points);
    }

    #[must_use]
    pub fn node_index(&self, id: StreetNodeId) -> Option<NodeIndex> {
        self.node_ids.get(&id).copied()
    }

    /// Graph node closest to `point`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPointsFound`] if the spatial index is empty.
    pub fn nearest_node(&self, point: Point<f64>) -> Result<NodeIndex, Error> {
        self.rtree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(IndexedPoint::node)
            .ok_or(Error::NoPointsFound)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeIndex`] if `index` is not in the graph.
    pub fn node(&self, index: NodeIndex) -> Result<&StreetNode, Error> {
        self.graph.node_weight(index).ok_or(Error::InvalidNodeIndex)
    }

    /// First edge from `source` to `target`, if any. Parallel segments
    /// between the same pair of nodes resolve to the first inserted one.
    #[must_use]
    pub fn edge_between(&self, source: NodeIndex, target: NodeIndex) -> Option<&StreetEdge> {
        self.graph
            .find_edge(source, target)
            .and_then(|edge| self.graph.edge_weight(edge))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
