pub mod edge;
pub mod graph;
pub mod node;

pub use edge::Edge;
pub use graph::{Graph, GraphError, GraphStats, Neighbors};
pub use node::{Node, NodeId, Point};
