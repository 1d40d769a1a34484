//! Bar-value sequence for sorting visualizers.

use rand::Rng;

/// Bar heights stay in this range so every bar is visible on screen.
const MIN_VALUE: u32 = 5;
const MAX_VALUE: u32 = 100;

/// An ordered list of numeric values, one per bar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    values: Vec<u32>,
}

impl Sequence {
    /// Create a sequence from explicit values.
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// Generate `len` random bar values.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let values = (0..len).map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE)).collect();
        Self { values }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
