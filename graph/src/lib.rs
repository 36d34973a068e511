//! Graph model, pointer editing and BFS/DFS traversal for the graph canvas.

pub mod animator;
pub mod core;
pub mod editor;
pub mod traversal;

pub use animator::TraversalAnimator;
pub use self::core::{Edge, Graph, GraphError, GraphStats, Neighbors, Node, NodeId, Point};
pub use editor::{EditOutcome, GraphEditor, Selection};
pub use traversal::{
    Frontier, ParseMethodError, StepOutcome, TraversalError, TraversalMethod, TraversalState,
};
