//! Terminal front end for the sorting and graph traversal visualizers.
//!
//! Two panels share one screen: a bar chart driven by a background sort
//! thread, and a canvas where the user draws a graph and watches BFS or
//! DFS walk it on a timer.

pub mod app;
pub mod config;
pub mod controls;
pub mod event;
pub mod logging;
pub mod panels;
pub mod ticker;
pub mod widgets;

pub use app::{run_tui, App, Panel};
pub use config::AppConfig;
pub use controls::{Action, Button};
pub use event::{AppEvent, EventBus};
pub use logging::LogTarget;
pub use ticker::Ticker;
