//! BFS/DFS as an explicit state machine.
//!
//! [`TraversalState::step`] performs one tick of work: pop one frontier
//! element, mark it visited and push its unvisited neighbors. It knows
//! nothing about timers or drawing.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::core::{Graph, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalMethod {
    #[default]
    Bfs,
    Dfs,
}

impl TraversalMethod {
    pub const ALL: [TraversalMethod; 2] = [TraversalMethod::Bfs, TraversalMethod::Dfs];

    pub fn name(&self) -> &'static str {
        match self {
            TraversalMethod::Bfs => "BFS",
            TraversalMethod::Dfs => "DFS",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            TraversalMethod::Bfs => TraversalMethod::Dfs,
            TraversalMethod::Dfs => TraversalMethod::Bfs,
        }
    }
}

impl fmt::Display for TraversalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown traversal method `{0}` (expected bfs or dfs)")]
pub struct ParseMethodError(pub String);

impl FromStr for TraversalMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(TraversalMethod::Bfs),
            "dfs" => Ok(TraversalMethod::Dfs),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraversalError {
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("a {0} traversal is already running")]
    Busy(TraversalMethod),
}

/// Discovered but not yet processed nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frontier {
    Queue(VecDeque<NodeId>),
    Stack(Vec<NodeId>),
}

impl Frontier {
    fn seeded(method: TraversalMethod, start: NodeId) -> Self {
        match method {
            TraversalMethod::Bfs => Frontier::Queue(VecDeque::from([start])),
            TraversalMethod::Dfs => Frontier::Stack(vec![start]),
        }
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self {
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Stack(stack) => stack.pop(),
        }
    }

    fn push(&mut self, node: NodeId) {
        match self {
            Frontier::Queue(queue) => queue.push_back(node),
            Frontier::Stack(stack) => stack.push(node),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Queue(queue) => queue.len(),
            Frontier::Stack(stack) => stack.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Node was marked visited and its neighbors queued
    Visited(NodeId),
    /// Node was already visited when popped
    Skipped(NodeId),
    /// Frontier was empty; the traversal is over
    Finished,
    /// Nothing is running
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TraversalState {
    #[default]
    Idle,
    Running {
        method: TraversalMethod,
        frontier: Frontier,
        order: Vec<NodeId>,
    },
    Done {
        method: TraversalMethod,
        order: Vec<NodeId>,
    },
}

impl TraversalState {
    /// Clear visited flags and seed the frontier with the first node
    pub fn start(method: TraversalMethod, graph: &mut Graph) -> Result<Self, TraversalError> {
        let first = graph.first().ok_or(TraversalError::EmptyGraph)?;
        graph.clear_visited();
        Ok(TraversalState::Running {
            method,
            frontier: Frontier::seeded(method, first),
            order: Vec::new(),
        })
    }

    /// Advance by one tick
    pub fn step(self, graph: &mut Graph) -> (Self, StepOutcome) {
        match self {
            TraversalState::Running { method, mut frontier, mut order } => match frontier.pop() {
                Some(node) if graph.is_visited(node) => (
                    TraversalState::Running { method, frontier, order },
                    StepOutcome::Skipped(node),
                ),
                Some(node) => {
                    graph.mark_visited(node);
                    order.push(node);
                    for neighbor in graph.unvisited_neighbors(node) {
                        frontier.push(neighbor);
                    }
                    (
                        TraversalState::Running { method, frontier, order },
                        StepOutcome::Visited(node),
                    )
                }
                None => (TraversalState::Done { method, order }, StepOutcome::Finished),
            },
            other => (other, StepOutcome::Idle),
        }
    }

    /// Step until the frontier is exhausted
    pub fn run_to_end(mut self, graph: &mut Graph) -> Self {
        loop {
            let (next, outcome) = self.step(graph);
            self = next;
            if matches!(outcome, StepOutcome::Finished | StepOutcome::Idle) {
                return self;
            }
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TraversalState::Running { .. })
    }

    pub fn method(&self) -> Option<TraversalMethod> {
        match self {
            TraversalState::Idle => None,
            TraversalState::Running { method, .. } | TraversalState::Done { method, .. } => {
                Some(*method)
            }
        }
    }

    /// Nodes visited so far, in visit order
    pub fn order(&self) -> &[NodeId] {
        match self {
            TraversalState::Idle => &[],
            TraversalState::Running { order, .. } | TraversalState::Done { order, .. } => order,
        }
    }

    pub fn frontier(&self) -> Option<&Frontier> {
        match self {
            TraversalState::Running { frontier, .. } => Some(frontier),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point;
    use pretty_assertions::assert_eq;

    /// Nodes numbered from 1 like the canvas labels
    fn build(nodes: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new();
        for i in 0..nodes {
            g.add_node(Point::new(i as f64 * 10.0, 0.0));
        }
        for &(a, b) in edges {
            g.add_edge(NodeId(a - 1), NodeId(b - 1)).unwrap();
        }
        g
    }

    fn labels(order: &[NodeId]) -> Vec<usize> {
        order.iter().map(NodeId::label).collect()
    }

    #[test]
    fn bfs_on_a_path() {
        let mut g = build(3, &[(1, 2), (2, 3)]);
        let done = TraversalState::start(TraversalMethod::Bfs, &mut g).unwrap().run_to_end(&mut g);
        assert_eq!(labels(done.order()), vec![1, 2, 3]);
        assert!(g.nodes().iter().all(|n| n.is_visited()));
    }

    #[test]
    fn dfs_on_a_path() {
        let mut g = build(3, &[(1, 2), (2, 3)]);
        let done = TraversalState::start(TraversalMethod::Dfs, &mut g).unwrap().run_to_end(&mut g);
        assert_eq!(labels(done.order()), vec![1, 2, 3]);
    }

    #[test]
    fn bfs_and_dfs_differ_on_a_star_with_tail() {
        // 1 connects to 2 and 3; 2 continues to 4
        let edges = [(1, 2), (1, 3), (2, 4)];

        let mut g = build(4, &edges);
        let bfs = TraversalState::start(TraversalMethod::Bfs, &mut g).unwrap().run_to_end(&mut g);
        assert_eq!(labels(bfs.order()), vec![1, 2, 3, 4]);

        let mut g = build(4, &edges);
        let dfs = TraversalState::start(TraversalMethod::Dfs, &mut g).unwrap().run_to_end(&mut g);
        // the last neighbor pushed is popped first
        assert_eq!(labels(dfs.order()), vec![1, 3, 2, 4]);
    }

    #[test]
    fn one_tick_per_pop_then_a_finishing_tick() {
        let mut g = build(3, &[(1, 2), (2, 3)]);
        let mut state = TraversalState::start(TraversalMethod::Bfs, &mut g).unwrap();
        let mut outcomes = Vec::new();
        loop {
            let (next, outcome) = state.step(&mut g);
            state = next;
            outcomes.push(outcome);
            if outcome == StepOutcome::Finished {
                break;
            }
        }
        assert_eq!(
            outcomes,
            vec![
                StepOutcome::Visited(NodeId(0)),
                StepOutcome::Visited(NodeId(1)),
                StepOutcome::Visited(NodeId(2)),
                StepOutcome::Finished,
            ]
        );
        assert!(!state.is_running());
        assert_eq!(state.step(&mut g).1, StepOutcome::Idle);
    }

    #[test]
    fn duplicates_are_discarded_at_pop_time() {
        // triangle: 2 and 3 are both queued before either is visited,
        // so 3 is queued a second time from 2
        let mut g = build(3, &[(1, 2), (1, 3), (2, 3)]);
        let mut state = TraversalState::start(TraversalMethod::Bfs, &mut g).unwrap();
        let mut skipped = Vec::new();
        loop {
            let (next, outcome) = state.step(&mut g);
            state = next;
            match outcome {
                StepOutcome::Skipped(node) => skipped.push(node),
                StepOutcome::Finished => break,
                _ => {}
            }
        }
        assert_eq!(skipped, vec![NodeId(2)]);
        assert_eq!(labels(state.order()), vec![1, 2, 3]);
    }

    #[test]
    fn unreachable_nodes_stay_unvisited() {
        let mut g = build(4, &[(1, 2)]);
        TraversalState::start(TraversalMethod::Dfs, &mut g).unwrap().run_to_end(&mut g);
        assert_eq!(g.stats().visited, 2);
        assert!(!g.is_visited(NodeId(3)));
    }

    #[test]
    fn start_rejects_empty_graph_and_clears_flags() {
        let mut empty = Graph::new();
        assert_eq!(
            TraversalState::start(TraversalMethod::Bfs, &mut empty),
            Err(TraversalError::EmptyGraph)
        );

        let mut g = build(2, &[(1, 2)]);
        g.mark_visited(NodeId(1));
        let state = TraversalState::start(TraversalMethod::Bfs, &mut g).unwrap();
        assert_eq!(g.stats().visited, 0);
        assert_eq!(state.frontier().map(Frontier::len), Some(1));
    }

    #[test]
    fn parse_methods() {
        assert_eq!("bfs".parse::<TraversalMethod>(), Ok(TraversalMethod::Bfs));
        assert_eq!("DFS".parse::<TraversalMethod>(), Ok(TraversalMethod::Dfs));
        assert!("dijkstra".parse::<TraversalMethod>().is_err());
        assert_eq!(TraversalMethod::Bfs.toggled(), TraversalMethod::Dfs);
    }
}
