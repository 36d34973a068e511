use std::sync::mpsc::Sender;
use std::time::Duration;

use graph::{EditOutcome, StepOutcome, TraversalAnimator, TraversalMethod};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
    Frame,
};
use tracing::{debug, trace};

use crate::config::AppConfig;
use crate::controls::{Action, Button};
use crate::event::AppEvent;
use crate::ticker::Ticker;
use crate::widgets::{CanvasGeometry, GraphWidget};

/// Drawing canvas and traversal controls
pub struct GraphPanel {
    animator: TraversalAnimator,
    method: TraversalMethod,
    ticker: Ticker,
    geometry: CanvasGeometry,
    events: Sender<AppEvent>,
}

impl GraphPanel {
    pub fn new(config: &AppConfig, events: Sender<AppEvent>) -> Self {
        Self {
            animator: TraversalAnimator::new(config.node_radius),
            method: TraversalMethod::default(),
            ticker: Ticker::new(config.traversal_tick()),
            geometry: CanvasGeometry::default(),
            events,
        }
    }

    pub fn method(&self) -> TraversalMethod {
        self.method
    }

    pub fn animator(&self) -> &TraversalAnimator {
        &self.animator
    }

    pub fn buttons(&self) -> Vec<Button> {
        vec![
            Button::new(self.method.name(), Action::ToggleMethod),
            Button::new("Start", Action::StartTraversal).active(self.animator.is_running()),
            Button::new("Reuse Graph", Action::ReuseGraph),
            Button::new("Reset Graph", Action::ResetGraph),
        ]
    }

    pub fn status(&self) -> String {
        let stats = self.animator.graph().stats();
        let phase = match self.animator.state().method() {
            Some(method) if self.animator.is_running() => format!(" | {method} running"),
            Some(method) => format!(" | {method} done"),
            None => String::new(),
        };
        format!(
            "{} nodes, {} edges, {} visited{}",
            stats.nodes, stats.edges, stats.visited, phase
        )
    }

    pub fn handle(&mut self, action: Action) -> bool {
        match action {
            Action::ToggleMethod => {
                self.method = self.method.toggled();
            }
            Action::StartTraversal => match self.animator.start(self.method) {
                Ok(()) => self.ticker.start(),
                Err(err) => debug!(%err, "traversal start ignored"),
            },
            Action::ReuseGraph => {
                self.ticker.stop();
                self.animator.reuse();
            }
            Action::ResetGraph => {
                self.ticker.stop();
                self.animator.reset();
            }
            _ => return false,
        }
        true
    }

    /// Left click at a terminal cell. Returns true when the graph changed.
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        let Some(point) = self.geometry.to_point(column, row) else {
            return false;
        };
        let outcome = self.animator.press(point);
        trace!(?outcome, x = point.x, y = point.y, "canvas click");
        !matches!(outcome, EditOutcome::Ignored)
    }

    /// Advance the traversal if a tick is due. Returns true when something changed.
    pub fn tick(&mut self) -> bool {
        if !self.ticker.poll() {
            return false;
        }
        match self.animator.tick() {
            StepOutcome::Finished => {
                self.ticker.stop();
                let method = self.animator.state().method().unwrap_or(self.method);
                let order: Vec<String> = self
                    .animator
                    .state()
                    .order()
                    .iter()
                    .map(|id| id.label().to_string())
                    .collect();
                let _ = self.events.send(AppEvent::Status(format!(
                    "{} order: {}",
                    method,
                    order.join(" ")
                )));
                true
            }
            StepOutcome::Idle => {
                self.ticker.stop();
                false
            }
            StepOutcome::Visited(_) | StepOutcome::Skipped(_) => true,
        }
    }

    pub fn time_until_tick(&self) -> Option<Duration> {
        self.ticker.time_until_next()
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(" Graph Traversal ({}) ", self.method);
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.geometry = CanvasGeometry::new(inner);
        frame.render_widget(
            GraphWidget::new(self.animator.graph(), self.animator.hit_radius())
                .selection(self.animator.selection()),
            inner,
        );
    }

    #[cfg(test)]
    fn set_geometry(&mut self, area: Rect) {
        self.geometry = CanvasGeometry::new(area);
    }
}
