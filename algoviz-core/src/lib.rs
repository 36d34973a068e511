pub mod animator;
pub mod array;
pub mod cancel;
pub mod sort;
pub mod tape;

pub use animator::{
    lock_model, AnimatorError, SortAnimator, SortOutcome, SortReport, DEFAULT_STEP_DELAY,
};
pub use array::{
    ArrayModel, Highlight, ModelError, MAX_SIZE, MAX_VALUE, MIN_SIZE, MIN_VALUE, SIZE_CHOICES,
};
pub use cancel::CancelToken;
pub use sort::{ParseAlgorithmError, SortAlgorithm};
pub use tape::{Cancelled, Frame, RecordingTape, SortTape};
