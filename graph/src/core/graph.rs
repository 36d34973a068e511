use smallvec::SmallVec;
use thiserror::Error;

use super::{edge::Edge, node::{Node, NodeId, Point}};

/// Unvisited neighbors of one node, in edge order
pub type Neighbors = SmallVec<[NodeId; 4]>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
}

/// User-drawn undirected graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at `position` and return its id
    pub fn add_node(&mut self, position: Point) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, position));
        id
    }

    /// Add an edge between two existing nodes.
    ///
    /// Self-edges and duplicates are accepted as drawn.
    pub fn add_edge(&mut self, start: NodeId, end: NodeId) -> Result<Edge, GraphError> {
        for id in [start, end] {
            if self.node(id).is_none() {
                return Err(GraphError::UnknownNode(id));
            }
        }
        let edge = Edge::new(start, end);
        self.edges.push(edge);
        Ok(edge)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The node traversals start from
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().map(Node::id)
    }

    /// First node in creation order strictly within `radius` of `point`
    pub fn node_at(&self, point: Point, radius: f64) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|node| node.position().distance(point) < radius)
            .map(Node::id)
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_visited)
    }

    pub fn mark_visited(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.set_visited(true);
        }
    }

    /// Unvisited nodes adjacent to `id`, found by scanning every edge.
    ///
    /// Both edge directions count as adjacency.
    pub fn unvisited_neighbors(&self, id: NodeId) -> Neighbors {
        let mut out = Neighbors::new();
        for edge in &self.edges {
            if edge.start == id && !self.is_visited(edge.end) {
                out.push(edge.end);
            } else if edge.end == id && !self.is_visited(edge.start) {
                out.push(edge.start);
            }
        }
        out
    }

    pub fn clear_visited(&mut self) {
        for node in &mut self.nodes {
            node.set_visited(false);
        }
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            visited: self.nodes.iter().filter(|n| n.is_visited()).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub visited: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut g = Graph::new();
        let a = g.add_node(Point::new(0.0, 0.0));
        let b = g.add_node(Point::new(10.0, 0.0));
        let c = g.add_node(Point::new(0.0, 10.0));
        g.add_edge(a, b).unwrap();
        g.add_edge(c, a).unwrap();
        g.add_edge(b, c).unwrap();
        g
    }

    #[test]
    fn ids_follow_creation_order() {
        let g = triangle();
        let ids: Vec<usize> = g.nodes().iter().map(|n| n.id().0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(g.first(), Some(NodeId(0)));
        assert_eq!(NodeId(2).label(), 3);
    }

    #[test]
    fn hit_test_uses_strict_radius_and_creation_order() {
        let mut g = Graph::new();
        let a = g.add_node(Point::new(0.0, 0.0));
        let b = g.add_node(Point::new(2.0, 0.0));
        assert_eq!(g.node_at(Point::new(1.0, 0.0), 3.0), Some(a));
        assert_eq!(g.node_at(Point::new(5.0, 0.0), 3.0), None);
        assert_eq!(g.node_at(Point::new(4.9, 0.0), 3.0), Some(b));
    }

    #[test]
    fn neighbors_follow_both_directions() {
        let mut g = triangle();
        assert_eq!(g.unvisited_neighbors(NodeId(0)).as_slice(), &[NodeId(1), NodeId(2)]);
        g.mark_visited(NodeId(1));
        assert_eq!(g.unvisited_neighbors(NodeId(0)).as_slice(), &[NodeId(2)]);
    }

    #[test]
    fn self_and_duplicate_edges_are_kept() {
        let mut g = triangle();
        g.add_edge(NodeId(0), NodeId(0)).unwrap();
        g.add_edge(NodeId(0), NodeId(1)).unwrap();
        assert_eq!(g.edge_count(), 5);
        assert_eq!(
            g.unvisited_neighbors(NodeId(0)).as_slice(),
            &[NodeId(1), NodeId(2), NodeId(0), NodeId(1)]
        );
    }

    #[test]
    fn unknown_endpoints_are_rejected() {
        let mut g = triangle();
        assert_eq!(g.add_edge(NodeId(0), NodeId(7)), Err(GraphError::UnknownNode(NodeId(7))));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn clear_visited_keeps_geometry() {
        let mut g = triangle();
        g.mark_visited(NodeId(0));
        g.mark_visited(NodeId(2));
        assert_eq!(g.stats().visited, 2);
        g.clear_visited();
        assert_eq!(g.stats(), GraphStats { nodes: 3, edges: 3, visited: 0 });
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }
}
