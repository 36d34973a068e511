use serde::Serialize;
use thiserror::Error;

use crate::array::Highlight;

/// Marker returned when a pause observes cancellation
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("animation cancelled")]
pub struct Cancelled;

/// The surface a sorting algorithm animates over.
///
/// Algorithms only read and write cells through this trait and call
/// [`SortTape::pause`] after every visible step, so the same code drives
/// the live animation and the synchronous recorder.
pub trait SortTape {
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> i32;
    fn set(&mut self, index: usize, value: i32);
    fn swap(&mut self, a: usize, b: usize);
    fn highlight(&mut self, highlight: Highlight);

    fn is_cancelled(&self) -> bool;

    /// Request a redraw without waiting
    fn publish(&mut self);

    /// Request a redraw and wait out the step delay
    fn pause(&mut self) -> Result<(), Cancelled>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// One published state of the array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub values: Vec<i32>,
    pub highlight: Highlight,
}

/// Runs an algorithm synchronously and records every published frame
#[derive(Debug, Clone, Default)]
pub struct RecordingTape {
    values: Vec<i32>,
    highlight: Highlight,
    frames: Vec<Frame>,
    pauses: usize,
    cancel_after: Option<usize>,
    record_frames: bool,
}

impl RecordingTape {
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            record_frames: true,
            ..Self::default()
        }
    }

    /// Cancel once `pauses` pauses have completed
    pub fn cancel_after(mut self, pauses: usize) -> Self {
        self.cancel_after = Some(pauses);
        self
    }

    /// Count steps without keeping frame snapshots
    pub fn without_frames(mut self) -> Self {
        self.record_frames = false;
        self
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn into_values(self) -> Vec<i32> {
        self.values
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn pauses(&self) -> usize {
        self.pauses
    }

    pub fn current_highlight(&self) -> Highlight {
        self.highlight
    }
}

impl SortTape for RecordingTape {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn get(&self, index: usize) -> i32 {
        self.values[index]
    }

    fn set(&mut self, index: usize, value: i32) {
        self.values[index] = value;
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
    }

    fn highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_after.is_some_and(|limit| self.pauses >= limit)
    }

    fn publish(&mut self) {
        if self.record_frames {
            self.frames.push(Frame {
                values: self.values.clone(),
                highlight: self.highlight,
            });
        }
    }

    fn pause(&mut self) -> Result<(), Cancelled> {
        self.publish();
        self.check()?;
        self.pauses += 1;
        Ok(())
    }
}
