use tracing::warn;

use crate::core::{Edge, Graph, NodeId, Point};

/// Pointer selection on the graph canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Node(NodeId),
}

/// What a pointer press changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    NodeAdded(NodeId),
    Selected(NodeId),
    EdgeAdded(Edge),
    Deselected,
    /// The press was not applied (a traversal is running)
    Ignored,
}

/// Turns pointer presses into nodes, selections and edges
#[derive(Debug, Clone)]
pub struct GraphEditor {
    selection: Selection,
    hit_radius: f64,
}

impl GraphEditor {
    pub fn new(hit_radius: f64) -> Self {
        Self {
            selection: Selection::None,
            hit_radius,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn hit_radius(&self) -> f64 {
        self.hit_radius
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    /// Apply one press at `point`:
    /// empty space adds a node, a first click selects, a click on another
    /// node joins the two, and a click on the selected node deselects it.
    pub fn press(&mut self, graph: &mut Graph, point: Point) -> EditOutcome {
        let Some(clicked) = graph.node_at(point, self.hit_radius) else {
            return EditOutcome::NodeAdded(graph.add_node(point));
        };

        match self.selection {
            Selection::None => {
                self.selection = Selection::Node(clicked);
                EditOutcome::Selected(clicked)
            }
            Selection::Node(selected) if selected != clicked => {
                self.selection = Selection::None;
                match graph.add_edge(selected, clicked) {
                    Ok(edge) => EditOutcome::EdgeAdded(edge),
                    Err(err) => {
                        warn!(%err, "dropping edge to a missing node");
                        EditOutcome::Ignored
                    }
                }
            }
            Selection::Node(_) => {
                self.selection = Selection::None;
                EditOutcome::Deselected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sequence_builds_an_edge() {
        let mut graph = Graph::new();
        let mut editor = GraphEditor::new(3.0);

        assert_eq!(
            editor.press(&mut graph, Point::new(10.0, 10.0)),
            EditOutcome::NodeAdded(NodeId(0))
        );
        assert_eq!(
            editor.press(&mut graph, Point::new(30.0, 10.0)),
            EditOutcome::NodeAdded(NodeId(1))
        );
        assert_eq!(editor.selection(), Selection::None);

        assert_eq!(
            editor.press(&mut graph, Point::new(11.0, 10.0)),
            EditOutcome::Selected(NodeId(0))
        );
        assert_eq!(editor.selection(), Selection::Node(NodeId(0)));

        assert_eq!(
            editor.press(&mut graph, Point::new(29.0, 11.0)),
            EditOutcome::EdgeAdded(Edge::new(NodeId(0), NodeId(1)))
        );
        assert_eq!(editor.selection(), Selection::None);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn clicking_the_selected_node_deselects() {
        let mut graph = Graph::new();
        let mut editor = GraphEditor::new(3.0);
        editor.press(&mut graph, Point::new(0.0, 0.0));
        editor.press(&mut graph, Point::new(0.0, 0.0));
        assert_eq!(editor.press(&mut graph, Point::new(1.0, 1.0)), EditOutcome::Deselected);
        assert_eq!(editor.selection(), Selection::None);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn empty_space_adds_a_node_even_with_a_selection() {
        let mut graph = Graph::new();
        let mut editor = GraphEditor::new(3.0);
        editor.press(&mut graph, Point::new(0.0, 0.0));
        editor.press(&mut graph, Point::new(0.0, 0.0));
        assert_eq!(
            editor.press(&mut graph, Point::new(50.0, 0.0)),
            EditOutcome::NodeAdded(NodeId(1))
        );
        // the selection survives a node creation
        assert_eq!(editor.selection(), Selection::Node(NodeId(0)));
    }

    #[test]
    fn repeated_edges_are_allowed() {
        let mut graph = Graph::new();
        let mut editor = GraphEditor::new(3.0);
        editor.press(&mut graph, Point::new(0.0, 0.0));
        editor.press(&mut graph, Point::new(20.0, 0.0));
        for _ in 0..2 {
            editor.press(&mut graph, Point::new(20.0, 0.0));
            editor.press(&mut graph, Point::new(0.0, 0.0));
        }
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges()[0], Edge::new(NodeId(1), NodeId(0)));
    }
}
