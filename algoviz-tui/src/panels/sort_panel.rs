use std::sync::mpsc::Sender;

use algoviz_core::{ArrayModel, SortAlgorithm, SortAnimator, SortOutcome, SIZE_CHOICES};
use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
    Frame,
};
use tracing::debug;

use crate::config::AppConfig;
use crate::controls::{Action, Button};
use crate::event::AppEvent;
use crate::widgets::ArrayBars;

/// Bar chart of the array and the sort controls
pub struct SortPanel {
    animator: SortAnimator,
    size: usize,
    rng: StdRng,
    events: Sender<AppEvent>,
}

impl SortPanel {
    pub fn new(config: &AppConfig, events: Sender<AppEvent>) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let model = ArrayModel::random(config.initial_size, &mut rng)?;
        Ok(Self {
            animator: SortAnimator::new(model, config.sort_delay()),
            size: config.initial_size,
            rng,
            events,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn snapshot(&self) -> ArrayModel {
        self.animator.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.animator.is_running()
    }

    pub fn buttons(&self) -> Vec<Button> {
        let running = self.animator.running_algorithm();
        let mut buttons = vec![Button::new(format!("Size {}", self.size), Action::NextSize)];
        buttons.extend(SortAlgorithm::ALL.into_iter().map(|alg| {
            Button::new(alg.title(), Action::Sort(alg)).active(running == Some(alg))
        }));
        buttons.push(Button::new("Stop", Action::StopSort));
        buttons.push(Button::new("Reset", Action::ResetArray));
        buttons
    }

    pub fn status(&self) -> String {
        match self.animator.running_algorithm() {
            Some(alg) => format!("{} running on {} values", alg.title(), self.size),
            None => format!("{} values", self.size),
        }
    }

    /// Returns true when the action belonged to this panel
    pub fn handle(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::Sort(alg) => self.start(alg),
            Action::StopSort => {
                if self.animator.stop() {
                    self.notify("Stopping");
                }
            }
            Action::ResetArray => self.regenerate(self.size)?,
            Action::NextSize => self.regenerate(step_size(self.size, 1))?,
            Action::PrevSize => self.regenerate(step_size(self.size, -1))?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Collect the result of a finished run, if any
    pub fn poll(&mut self) {
        if let Some(report) = self.animator.reap() {
            let text = match report.outcome {
                SortOutcome::Completed => {
                    format!("{} done in {} steps", report.algorithm.title(), report.steps)
                }
                SortOutcome::Cancelled => format!("{} stopped", report.algorithm.title()),
            };
            self.notify(text);
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Sorting ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let model = self.snapshot();
        frame.render_widget(ArrayBars::new(model.values()).highlight(model.highlight()), inner);
    }

    fn start(&mut self, algorithm: SortAlgorithm) {
        let events = self.events.clone();
        let redraw = move || {
            let _ = events.send(AppEvent::Redraw);
        };
        if let Err(err) = self.animator.start(algorithm, redraw) {
            debug!(%err, "sort start ignored");
            self.notify(err.to_string());
        }
    }

    fn regenerate(&mut self, size: usize) -> Result<()> {
        self.animator.reset(size, &mut self.rng)?;
        self.size = size;
        Ok(())
    }

    fn notify(&self, text: impl Into<String>) {
        let _ = self.events.send(AppEvent::Status(text.into()));
    }
}

/// Neighbouring entry in the size list, wrapping at both ends
fn step_size(current: usize, direction: isize) -> usize {
    let len = SIZE_CHOICES.len() as isize;
    let index = SIZE_CHOICES
        .iter()
        .position(|&size| size == current)
        .map_or(0, |i| i as isize);
    SIZE_CHOICES[(index + direction).rem_euclid(len) as usize]
}
