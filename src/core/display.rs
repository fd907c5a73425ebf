//! Bounded series handed to renderers.

use super::window::RingBuffer;

/// Three index-aligned windows over the most recent plotted points.
///
/// Position `i` of `generations`, `raw` and `trend` describes the same point.
/// All three windows are only ever pushed together, so they always have the
/// same length and evict in lockstep.
#[derive(Clone, Debug)]
pub struct DisplayBuffers {
    generations: RingBuffer<u64>,
    raw: RingBuffer<f64>,
    trend: RingBuffer<f64>,
}

impl DisplayBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            generations: RingBuffer::new(capacity),
            raw: RingBuffer::new(capacity),
            trend: RingBuffer::new(capacity),
        }
    }

    pub fn append(&mut self, generation: u64, raw: f64, trend: f64) {
        self.generations.push(generation);
        self.raw.push(raw);
        self.trend.push(trend);
    }

    pub fn generations(&self) -> &RingBuffer<u64> {
        &self.generations
    }

    pub fn raw(&self) -> &RingBuffer<f64> {
        &self.raw
    }

    pub fn trend(&self) -> &RingBuffer<f64> {
        &self.trend
    }

    /// Aligned `(generation, raw, trend)` triples, oldest first.
    pub fn points(&self) -> impl Iterator<Item = (u64, f64, f64)> + '_ {
        self.generations
            .iter()
            .zip(self.raw.iter())
            .zip(self.trend.iter())
            .map(|((&generation, &raw), &trend)| (generation, raw, trend))
    }

    pub fn latest(&self) -> Option<(u64, f64, f64)> {
        Some((
            *self.generations.back()?,
            *self.raw.back()?,
            *self.trend.back()?,
        ))
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.generations.capacity()
    }
}
