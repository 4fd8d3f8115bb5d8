use std::collections::HashMap;

use crate::geometry::{Point, PointId};

/// Index of a node in a [`VisibilityGraph`].
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub id: NodeId,
    pub point: Point,
    pub neighbors: Vec<NodeId>,
}

/// Node arena with orthogonal visibility adjacency.
///
/// Two nodes are neighbours iff they share a row or a column. Whether the
/// connecting segment is obstacle-free is decided at search time.
#[derive(Debug, Clone, Default)]
pub struct VisibilityGraph {
    nodes: Vec<PathNode>,
    by_point: HashMap<PointId, NodeId>,
}

impl VisibilityGraph {
    /// Builds the graph from candidate points; points that round to an existing
    /// node are merged into it.
    pub fn build(points: &[Point]) -> Self {
        let mut nodes: Vec<PathNode> = Vec::with_capacity(points.len());
        let mut by_point = HashMap::with_capacity(points.len());
        for point in points {
            let key = point.id();
            if by_point.contains_key(&key) {
                continue;
            }
            let id = nodes.len();
            by_point.insert(key, id);
            nodes.push(PathNode {
                id,
                point: point.rounded(),
                neighbors: Vec::new(),
            });
        }

        let keys: Vec<PointId> = nodes.iter().map(|node| node.point.id()).collect();
        for (a, key_a) in keys.iter().enumerate() {
            nodes[a].neighbors = keys
                .iter()
                .enumerate()
                .filter(|&(b, key_b)| b != a && (key_a.x == key_b.x || key_a.y == key_b.y))
                .map(|(b, _)| b)
                .collect();
        }

        Self { nodes, by_point }
    }

    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn find(&self, point: Point) -> Option<NodeId> {
        self.by_point.get(&point.id()).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.neighbors.len()).sum::<usize>() / 2
    }
}
