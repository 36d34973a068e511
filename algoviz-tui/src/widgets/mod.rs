pub mod bars;
pub mod graph_canvas;

pub use bars::ArrayBars;
pub use graph_canvas::{CanvasGeometry, GraphWidget};
