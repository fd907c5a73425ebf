//! Simple moving average over the most recent observations.

use super::window::RingBuffer;

/// Running mean over the last `capacity` observed values.
///
/// The sum of the retained values is kept incrementally, so each observation
/// costs O(1). With a non-zero resync interval the sum is recomputed from the
/// retained window every `resync_interval` observations, which bounds the
/// floating-point drift over very long streams.
#[derive(Clone, Debug)]
pub struct RunningTrendEstimator {
    window: RingBuffer<f64>,
    running_sum: f64,
    resync_interval: usize,
    observed: u64,
}

impl RunningTrendEstimator {
    pub fn new(capacity: usize) -> Self {
        Self::with_resync_interval(capacity, 0)
    }

    pub fn with_resync_interval(capacity: usize, resync_interval: usize) -> Self {
        Self {
            window: RingBuffer::new(capacity),
            running_sum: 0.0,
            resync_interval,
            observed: 0,
        }
    }

    /// Add a value and return the mean of the retained window.
    pub fn observe(&mut self, value: f64) -> f64 {
        if let Some(oldest) = self.window.push(value) {
            self.running_sum -= oldest;
        }
        self.running_sum += value;
        self.observed += 1;

        if self.resync_interval > 0 && self.observed % self.resync_interval as u64 == 0 {
            self.resync();
        }

        self.running_sum / self.window.len() as f64
    }

    /// Recompute the running sum from the retained values.
    pub fn resync(&mut self) {
        self.running_sum = self.window.iter().sum();
    }

    pub fn mean(&self) -> Option<f64> {
        match self.window.len() {
            0 => None,
            len => Some(self.running_sum / len as f64),
        }
    }

    pub fn window(&self) -> &RingBuffer<f64> {
        &self.window
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Total number of values observed since construction.
    pub fn observed(&self) -> u64 {
        self.observed
    }
}
