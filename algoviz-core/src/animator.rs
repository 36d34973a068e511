use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::array::{ArrayModel, Highlight, ModelError};
use crate::cancel::CancelToken;
use crate::sort::SortAlgorithm;
use crate::tape::{Cancelled, SortTape};

/// Default pause between visible steps
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum AnimatorError {
    #[error("{running} sort is still running")]
    Busy { running: SortAlgorithm },
    #[error("failed to spawn sort thread: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOutcome {
    Completed,
    Cancelled,
}

/// Summary of a finished animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortReport {
    pub algorithm: SortAlgorithm,
    pub outcome: SortOutcome,
    /// Number of completed pauses
    pub steps: usize,
}

/// Lock the shared model, recovering from a poisoned lock
pub fn lock_model(model: &Mutex<ArrayModel>) -> MutexGuard<'_, ArrayModel> {
    model.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tape over the shared model used by the background thread.
///
/// The lock is held only for a single read or write, never across a pause.
struct SharedTape {
    model: Arc<Mutex<ArrayModel>>,
    token: CancelToken,
    redraw: Box<dyn Fn() + Send>,
    delay: Duration,
    steps: usize,
}

impl SharedTape {
    fn finish(&mut self) {
        lock_model(&self.model).clear_highlight();
        (self.redraw)();
    }
}

impl SortTape for SharedTape {
    fn len(&self) -> usize {
        lock_model(&self.model).len()
    }

    fn get(&self, index: usize) -> i32 {
        lock_model(&self.model).get(index)
    }

    fn set(&mut self, index: usize, value: i32) {
        lock_model(&self.model).set(index, value);
    }

    fn swap(&mut self, a: usize, b: usize) {
        lock_model(&self.model).swap(a, b);
    }

    fn highlight(&mut self, highlight: Highlight) {
        lock_model(&self.model).set_highlight(highlight);
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    fn publish(&mut self) {
        (self.redraw)();
    }

    fn pause(&mut self) -> Result<(), Cancelled> {
        self.publish();
        if !self.token.sleep(self.delay) {
            return Err(Cancelled);
        }
        self.steps += 1;
        Ok(())
    }
}

struct SortTask {
    algorithm: SortAlgorithm,
    token: CancelToken,
    handle: JoinHandle<SortReport>,
}

impl SortTask {
    fn join(self) -> Option<SortReport> {
        match self.handle.join() {
            Ok(report) => Some(report),
            Err(_) => {
                warn!(algorithm = %self.algorithm, "sort thread panicked");
                None
            }
        }
    }
}

/// Owns the array and at most one running sort over it
pub struct SortAnimator {
    model: Arc<Mutex<ArrayModel>>,
    delay: Duration,
    task: Option<SortTask>,
}

impl SortAnimator {
    pub fn new(model: ArrayModel, delay: Duration) -> Self {
        Self {
            model: Arc::new(Mutex::new(model)),
            delay,
            task: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Takes effect on the next start
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Copy of the current array state for drawing
    pub fn snapshot(&self) -> ArrayModel {
        lock_model(&self.model).clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.handle.is_finished())
    }

    pub fn running_algorithm(&self) -> Option<SortAlgorithm> {
        self.task
            .as_ref()
            .filter(|task| !task.handle.is_finished())
            .map(|task| task.algorithm)
    }

    /// Start `algorithm` on a background thread.
    ///
    /// `redraw` is called after every visible step and once more when the
    /// run ends. Fails with [`AnimatorError::Busy`] while another sort runs.
    pub fn start<F>(&mut self, algorithm: SortAlgorithm, redraw: F) -> Result<(), AnimatorError>
    where
        F: Fn() + Send + 'static,
    {
        if let Some(running) = self.running_algorithm() {
            debug!(requested = %algorithm, %running, "rejecting sort start");
            return Err(AnimatorError::Busy { running });
        }
        self.reap();

        let token = CancelToken::new();
        let mut tape = SharedTape {
            model: Arc::clone(&self.model),
            token: token.clone(),
            redraw: Box::new(redraw),
            delay: self.delay,
            steps: 0,
        };

        let handle = thread::Builder::new()
            .name(format!("sort-{}", algorithm))
            .spawn(move || {
                let outcome = match algorithm.run(&mut tape) {
                    Ok(()) => SortOutcome::Completed,
                    Err(Cancelled) => SortOutcome::Cancelled,
                };
                tape.finish();
                info!(%algorithm, ?outcome, steps = tape.steps, "sort finished");
                SortReport {
                    algorithm,
                    outcome,
                    steps: tape.steps,
                }
            })?;

        info!(%algorithm, delay_ms = self.delay.as_millis() as u64, "sort started");
        self.task = Some(SortTask { algorithm, token, handle });
        Ok(())
    }

    /// Ask the running sort to stop. Returns false if nothing was running.
    pub fn stop(&self) -> bool {
        match &self.task {
            Some(task) if !task.handle.is_finished() => {
                debug!(algorithm = %task.algorithm, "cancelling sort");
                task.token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Join the task if it has already finished
    pub fn reap(&mut self) -> Option<SortReport> {
        if self.task.as_ref()?.handle.is_finished() {
            self.task.take()?.join()
        } else {
            None
        }
    }

    /// Block until the current task finishes on its own
    pub fn wait(&mut self) -> Option<SortReport> {
        self.task.take()?.join()
    }

    /// Cancel the current task and block until its thread exits
    pub fn cancel_and_join(&mut self) -> Option<SortReport> {
        let task = self.task.take()?;
        task.token.cancel();
        task.join()
    }

    /// Stop any running sort, then fill the array with `size` fresh values
    pub fn reset<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) -> Result<(), ModelError> {
        self.cancel_and_join();
        lock_model(&self.model).regenerate(size, rng)?;
        debug!(size, "array regenerated");
        Ok(())
    }

    /// Stop any running sort and install explicit values
    pub fn replace(&mut self, model: ArrayModel) {
        self.cancel_and_join();
        *lock_model(&self.model) = model;
    }
}

impl Drop for SortAnimator {
    fn drop(&mut self) {
        self.cancel_and_join();
    }
}
