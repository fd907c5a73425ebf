//! Fixed-capacity FIFO window.
//!
//! The window pre-allocates its storage at construction and never grows
//! beyond it. Once full, every push overwrites the oldest slot and hands the
//! evicted value back to the caller.

use std::iter::Chain;
use std::slice;

#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    head: usize,
    capacity: usize,
}

pub type Iter<'a, T> = Chain<slice::Iter<'a, T>, slice::Iter<'a, T>>;

impl<T> RingBuffer<T> {
    /// Create an empty window holding at most `capacity` values.
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be at least one");
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    /// Append a value, returning the evicted oldest value if the window was full.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.slots.len() < self.capacity {
            self.slots.push(value);
            return None;
        }
        let evicted = std::mem::replace(&mut self.slots[self.head], value);
        self.head = (self.head + 1) % self.capacity;
        Some(evicted)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest retained value.
    pub fn front(&self) -> Option<&T> {
        self.slots.get(self.head)
    }

    /// Most recently pushed value.
    pub fn back(&self) -> Option<&T> {
        if self.slots.is_empty() {
            return None;
        }
        let idx = (self.head + self.slots.len() - 1) % self.slots.len();
        self.slots.get(idx)
    }

    /// Value at logical position `index`, where 0 is the oldest.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.slots.len() {
            return None;
        }
        self.slots.get((self.head + index) % self.slots.len())
    }

    /// The retained values as two contiguous slices, oldest first.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (newer, older) = self.slots.split_at(self.head);
        (older, newer)
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        let (older, newer) = self.as_slices();
        older.iter().chain(newer.iter())
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
