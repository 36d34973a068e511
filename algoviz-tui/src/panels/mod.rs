pub mod graph_panel;
pub mod sort_panel;

pub use graph_panel::GraphPanel;
pub use sort_panel::SortPanel;
