//! Pacing between two processed lines.

use std::thread;
use std::time::Duration;

/// Called by the stream driver after every rendered frame.
pub trait Pacer {
    fn pause(&mut self);
}

/// Blocks the driving thread for a fixed duration.
#[derive(Clone, Copy, Debug)]
pub struct SleepPacer {
    delay: Duration,
}

impl SleepPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Pacer for SleepPacer {
    fn pause(&mut self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// Does not wait at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self) {}
}

impl<F: FnMut()> Pacer for F {
    fn pause(&mut self) {
        self()
    }
}
