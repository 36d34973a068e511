use serde::Serialize;

use super::node::NodeId;

/// An undirected edge, stored in the order the user drew it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub start: NodeId,
    pub end: NodeId,
}

impl Edge {
    pub fn new(start: NodeId, end: NodeId) -> Self {
        Self { start, end }
    }

    /// The endpoint opposite `node`, if `node` is on this edge
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.start == node {
            Some(self.end)
        } else if self.end == node {
            Some(self.start)
        } else {
            None
        }
    }

    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }
}
