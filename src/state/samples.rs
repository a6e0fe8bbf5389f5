//! Bounded history of the tracked finger's horizontal positions.

use std::collections::VecDeque;

/// One horizontal position sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub time_ms: f64,
}

/// Time-ordered samples, oldest first. Pushing past capacity evicts the oldest.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SampleBuffer {
    /// Capacity below 2 cannot yield a velocity and is raised to 2.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, x: f64, time_ms: f64) {
        self.samples.push_back(Sample { x, time_ms });
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Drops all samples and starts over from a single seed sample.
    pub fn reset_with(&mut self, x: f64, time_ms: f64) {
        self.samples.clear();
        self.push(x, time_ms);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator {
        self.samples.iter()
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(crate::model::SAMPLE_CAPACITY)
    }
}
