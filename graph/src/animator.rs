use tracing::{debug, info};

use crate::core::{Graph, Point};
use crate::editor::{EditOutcome, GraphEditor, Selection};
use crate::traversal::{StepOutcome, TraversalError, TraversalMethod, TraversalState};

/// Graph, editor and traversal for one canvas.
///
/// The owner calls [`TraversalAnimator::tick`] from its timer and stops
/// the timer once a tick reports [`StepOutcome::Finished`].
#[derive(Debug, Clone)]
pub struct TraversalAnimator {
    graph: Graph,
    editor: GraphEditor,
    state: TraversalState,
}

impl TraversalAnimator {
    pub fn new(hit_radius: f64) -> Self {
        Self {
            graph: Graph::new(),
            editor: GraphEditor::new(hit_radius),
            state: TraversalState::Idle,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    pub fn selection(&self) -> Selection {
        self.editor.selection()
    }

    pub fn hit_radius(&self) -> f64 {
        self.editor.hit_radius()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Forward a pointer press to the editor unless a traversal is running
    pub fn press(&mut self, point: Point) -> EditOutcome {
        if self.is_running() {
            return EditOutcome::Ignored;
        }
        let outcome = self.editor.press(&mut self.graph, point);
        debug!(?outcome, x = point.x, y = point.y, "canvas press");
        outcome
    }

    pub fn start(&mut self, method: TraversalMethod) -> Result<(), TraversalError> {
        if let Some(running) = self.state.method().filter(|_| self.is_running()) {
            return Err(TraversalError::Busy(running));
        }
        self.state = TraversalState::start(method, &mut self.graph)?;
        self.editor.clear_selection();
        info!(
            %method,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "traversal started"
        );
        Ok(())
    }

    /// One timer tick
    pub fn tick(&mut self) -> StepOutcome {
        let state = std::mem::take(&mut self.state);
        let (next, outcome) = state.step(&mut self.graph);
        self.state = next;
        match outcome {
            StepOutcome::Visited(node) => debug!(%node, "visited"),
            StepOutcome::Finished => {
                info!(visited = self.state.order().len(), "traversal finished")
            }
            _ => {}
        }
        outcome
    }

    /// Drop nodes, edges and traversal state
    pub fn reset(&mut self) {
        self.reuse();
        self.graph.clear();
    }

    /// Keep the geometry; clear visited flags, selection and traversal state
    pub fn reuse(&mut self) {
        self.state = TraversalState::Idle;
        self.editor.clear_selection();
        self.graph.clear_visited();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeId;

    fn path_of_three() -> TraversalAnimator {
        let mut animator = TraversalAnimator::new(3.0);
        for x in [0.0, 20.0, 40.0] {
            animator.press(Point::new(x, 0.0));
        }
        // 1-2, 2-3
        for (a, b) in [(0.0, 20.0), (20.0, 40.0)] {
            animator.press(Point::new(a, 0.0));
            animator.press(Point::new(b, 0.0));
        }
        animator
    }

    #[test]
    fn start_rejects_empty_graph_and_busy() {
        let mut animator = TraversalAnimator::new(3.0);
        assert_eq!(animator.start(TraversalMethod::Bfs), Err(TraversalError::EmptyGraph));

        let mut animator = path_of_three();
        animator.start(TraversalMethod::Dfs).unwrap();
        assert_eq!(
            animator.start(TraversalMethod::Bfs),
            Err(TraversalError::Busy(TraversalMethod::Dfs))
        );
    }

    #[test]
    fn presses_are_ignored_while_running() {
        let mut animator = path_of_three();
        animator.start(TraversalMethod::Bfs).unwrap();
        assert_eq!(animator.press(Point::new(80.0, 0.0)), EditOutcome::Ignored);
        assert_eq!(animator.graph().node_count(), 3);
    }

    #[test]
    fn ticks_until_finished_then_allows_restart() {
        let mut animator = path_of_three();
        animator.start(TraversalMethod::Bfs).unwrap();
        let mut ticks = 0;
        while animator.tick() != StepOutcome::Finished {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert!(!animator.is_running());
        assert_eq!(animator.state().order(), &[NodeId(0), NodeId(1), NodeId(2)]);

        // a finished traversal does not block the next one
        animator.start(TraversalMethod::Dfs).unwrap();
        assert_eq!(animator.graph().stats().visited, 0);
    }

    #[test]
    fn start_clears_the_selection() {
        let mut animator = path_of_three();
        animator.press(Point::new(0.0, 0.0));
        assert_eq!(animator.selection(), Selection::Node(NodeId(0)));
        animator.start(TraversalMethod::Bfs).unwrap();
        assert_eq!(animator.selection(), Selection::None);
    }

    #[test]
    fn reuse_keeps_geometry_reset_drops_it() {
        let mut animator = path_of_three();
        animator.start(TraversalMethod::Bfs).unwrap();
        animator.tick();
        animator.tick();

        animator.reuse();
        assert!(!animator.is_running());
        assert_eq!(animator.graph().node_count(), 3);
        assert_eq!(animator.graph().edge_count(), 2);
        assert_eq!(animator.graph().stats().visited, 0);
        assert_eq!(animator.tick(), StepOutcome::Idle);

        animator.reset();
        assert!(animator.graph().is_empty());
        assert_eq!(animator.graph().edge_count(), 0);
    }
}
