use rand::Rng;
use serde::Serialize;
use thiserror::Error;

/// Smallest array the size selector offers
pub const MIN_SIZE: usize = 6;
/// Largest array the size selector offers
pub const MAX_SIZE: usize = 100;
/// Inclusive lower bound of generated values
pub const MIN_VALUE: i32 = 50;
/// Exclusive upper bound of generated values
pub const MAX_VALUE: i32 = 450;

/// Sizes offered by the size selector, in display order
pub const SIZE_CHOICES: [usize; 11] = [6, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("array size {size} is outside {}..={}", MIN_SIZE, MAX_SIZE)]
    SizeOutOfRange { size: usize },
}

/// Cells currently being compared or moved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub current: Option<usize>,
    pub next: Option<usize>,
}

impl Highlight {
    pub const NONE: Highlight = Highlight { current: None, next: None };

    pub fn pair(current: usize, next: usize) -> Self {
        Self { current: Some(current), next: Some(next) }
    }

    pub fn single(current: usize) -> Self {
        Self { current: Some(current), next: None }
    }

    pub fn is_none(&self) -> bool {
        self.current.is_none() && self.next.is_none()
    }
}

/// The array being sorted plus the cells to highlight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayModel {
    values: Vec<i32>,
    highlight: Highlight,
}

impl ArrayModel {
    /// Build a model over explicit values. Any length is accepted.
    pub fn from_values(values: Vec<i32>) -> Self {
        Self { values, highlight: Highlight::NONE }
    }

    /// Generate `size` random values in `MIN_VALUE..MAX_VALUE`
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, ModelError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(ModelError::SizeOutOfRange { size });
        }
        let values = (0..size).map(|_| rng.gen_range(MIN_VALUE..MAX_VALUE)).collect();
        Ok(Self::from_values(values))
    }

    /// Replace the contents with fresh random values and clear the highlight
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        size: usize,
        rng: &mut R,
    ) -> Result<(), ModelError> {
        *self = Self::random(size, rng)?;
        Ok(())
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> i32 {
        self.values[index]
    }

    pub fn set(&mut self, index: usize, value: i32) {
        self.values[index] = value;
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = Highlight::NONE;
    }

    /// True when the values are in non-decreasing order
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}
