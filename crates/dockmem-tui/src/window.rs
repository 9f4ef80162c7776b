//! Sliding window of recent samples for one chart series.

use std::collections::VecDeque;

use dockmem_common::constants::WINDOW_CAPACITY;

/// Oldest-first history of one metric.
///
/// The window only evicts once it holds *more* than `capacity` samples,
/// so once warmed up it carries `capacity + 1` entries. Charts drawn from
/// it are therefore one sample wider than the nominal capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow {
    capacity: usize,
    samples: VecDeque<f64>,
}

impl SlidingWindow {
    /// Creates an empty window with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }

    /// Creates an empty window with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Appends `value`, first dropping the oldest sample if the window
    /// already holds more than `capacity` samples.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() > self.capacity {
            let _ = self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Nominal capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no sample has been pushed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Copies the samples out, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new()
    }
}
