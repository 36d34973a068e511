use graph::{Graph, NodeId, Point, Selection};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Line as Segment},
        Widget,
    },
};

pub const UNVISITED_COLOR: Color = Color::Red;
pub const VISITED_COLOR: Color = Color::Green;
pub const EDGE_COLOR: Color = Color::Gray;
pub const SELECTED_COLOR: Color = Color::Blue;

/// Maps terminal cells to logical canvas coordinates.
///
/// One column is one unit wide and one row is two units tall, so circles
/// keep their shape on a typical terminal font. The logical origin is the
/// top-left corner with y growing downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasGeometry {
    pub area: Rect,
}

impl CanvasGeometry {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }

    /// Centre of the cell at (`column`, `row`), or `None` outside the canvas
    pub fn to_point(&self, column: u16, row: u16) -> Option<Point> {
        if !self.contains(column, row) {
            return None;
        }
        let x = f64::from(column - self.area.x) + 0.5;
        let y = (f64::from(row - self.area.y) + 0.5) * 2.0;
        Some(Point::new(x, y))
    }

    pub fn width(&self) -> f64 {
        f64::from(self.area.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.area.height) * 2.0
    }

    fn flip(&self, y: f64) -> f64 {
        self.height() - y
    }
}

/// Draws edges as lines and nodes as labelled dots
pub struct GraphWidget<'a> {
    graph: &'a Graph,
    selection: Selection,
    radius: f64,
}

impl<'a> GraphWidget<'a> {
    pub fn new(graph: &'a Graph, radius: f64) -> Self {
        Self {
            graph,
            selection: Selection::None,
            radius,
        }
    }

    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    fn node_color(&self, id: NodeId) -> Color {
        if self.graph.is_visited(id) {
            VISITED_COLOR
        } else {
            UNVISITED_COLOR
        }
    }
}

impl Widget for GraphWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let geometry = CanvasGeometry::new(area);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, geometry.width()])
            .y_bounds([0.0, geometry.height()])
            .paint(|ctx| {
                for edge in self.graph.edges() {
                    let endpoints = (self.graph.node(edge.start), self.graph.node(edge.end));
                    let (Some(a), Some(b)) = endpoints else {
                        continue;
                    };
                    let (a, b) = (a.position(), b.position());
                    ctx.draw(&Segment::new(
                        a.x,
                        geometry.flip(a.y),
                        b.x,
                        geometry.flip(b.y),
                        EDGE_COLOR,
                    ));
                }
                ctx.layer();

                for node in self.graph.nodes() {
                    let p = node.position();
                    let color = self.node_color(node.id());
                    ctx.draw(&Circle {
                        x: p.x,
                        y: geometry.flip(p.y),
                        radius: self.radius / 2.0,
                        color,
                    });
                    if self.selection == Selection::Node(node.id()) {
                        ctx.draw(&Circle {
                            x: p.x,
                            y: geometry.flip(p.y),
                            radius: self.radius,
                            color: SELECTED_COLOR,
                        });
                    }
                }
                ctx.layer();

                for node in self.graph.nodes() {
                    let p = node.position();
                    let style = Style::default()
                        .fg(self.node_color(node.id()))
                        .add_modifier(Modifier::BOLD);
                    let label = Span::styled(node.id().label().to_string(), style);
                    ctx.print(p.x, geometry.flip(p.y), label);
                }
            })
            .render(area, buf);
    }
}
