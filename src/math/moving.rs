//! Moving averages over circular buffers.
//!
//! ## Purpose
//!
//! This module provides two moving averages over a stream of data points:
//! [`FixedMovingAverage`], which averages a constant number of points with an
//! O(1) update, and [`FlexibleMovingAverage`], which averages everything it
//! has been given until told to shrink. Both report the group delay of the
//! filter relative to the original signal.
//!
//! ## Design notes
//!
//! * **O(1) fixed window**: the fixed variant keeps a running value and
//!   corrects it by the difference between the incoming and outgoing points,
//!   instead of re-summing the window.
//! * **Zero seeding**: until as many points as the window size have been
//!   added, the fixed variant averages over implicit zeros; callers wanting
//!   a warm-up-free average should use the flexible variant.
//! * **Single-threaded**: like the rest of the crate, instances require
//!   external synchronization if shared across threads.
//!
//! ## Non-goals
//!
//! * No weighted or exponential moving averages.
//! * No abscissa bookkeeping (time units, steps); callers convert a desired
//!   span to a discrete window size via [`discrete_window`].

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;
#[cfg(feature = "std")]
use std::collections::VecDeque;

// External dependencies
use num_traits::Float;

// ============================================================================
// Contract
// ============================================================================

/// Common contract for moving averages.
pub trait MovingAverage<T: Float> {
    /// Add a new data point to the average.
    fn add(&mut self, datum: T);

    /// Current value of the average.
    fn value(&self) -> T;

    /// Number of data points currently averaged.
    fn len(&self) -> usize;

    /// Whether no data point is currently averaged.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset of the moving average relative to the original signal, in
    /// number of data points: (len - 1) / 2.
    fn delay(&self) -> T {
        let half = T::from(0.5).unwrap();
        half * (T::from(self.len()).unwrap() - T::one())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Discrete window size closest to `span / step`, at least 1.
///
/// Converts a desired averaging span in abscissa units (e.g. seconds) and
/// the distance between consecutive points into a point count. A ratio too
/// large for `usize` saturates to `usize::MAX`.
///
/// # Panics
///
/// Panics if `span` or `step` is not greater than zero.
pub fn discrete_window<T: Float>(span: T, step: T) -> usize {
    assert!(
        span > T::zero() && step > T::zero(),
        "span and step must be greater than zero"
    );
    let size = (span / step).round().to_usize().unwrap_or(usize::MAX);
    size.max(1)
}

// ============================================================================
// Fixed Window
// ============================================================================

/// Moving average over a constant number of data points.
///
/// Optimized for continuous retrieval of the value: each [`add`] replaces
/// the oldest point in O(1). Before as many points as the window size have
/// been added, the implicit initial points are zero.
///
/// [`add`]: MovingAverage::add
pub struct FixedMovingAverage<T: Float> {
    buffer: VecDeque<T>,
    weight: T,
    value: T,
}

impl<T: Float> FixedMovingAverage<T> {
    /// Create a moving average over `size` points, seeded with zeros.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0; fewer than one value cannot be averaged.
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "cannot average less than 1 value");
        let mut buffer = VecDeque::with_capacity(size);
        for _ in 0..size {
            buffer.push_back(T::zero());
        }
        Self {
            buffer,
            weight: T::one() / T::from(size).unwrap(),
            value: T::zero(),
        }
    }
}

impl<T: Float> MovingAverage<T> for FixedMovingAverage<T> {
    fn add(&mut self, datum: T) {
        // The constructor guarantees the buffer holds at least one entry.
        let oldest = self.buffer.pop_front().unwrap();
        self.value = self.value + (datum - oldest) * self.weight;
        self.buffer.push_back(datum);
    }

    fn value(&self) -> T {
        self.value
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

// ============================================================================
// Flexible Window
// ============================================================================

/// Moving average over a growing number of data points.
///
/// Every point counts towards the average and none is dequeued
/// automatically; [`shrink_to`] dequeues the oldest points manually.
///
/// [`shrink_to`]: FlexibleMovingAverage::shrink_to
pub struct FlexibleMovingAverage<T: Float> {
    buffer: VecDeque<T>,
}

impl<T: Float> FlexibleMovingAverage<T> {
    /// Create an empty moving average.
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
        }
    }

    /// Create an empty moving average with initial capacity for `capacity`
    /// data points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    /// Dequeue the oldest points until at most `size` remain. Growing the
    /// window this way has no effect.
    pub fn shrink_to(&mut self, size: usize) {
        while self.buffer.len() > size {
            self.buffer.pop_front();
        }
    }

    /// Remove all data points; same effect as `shrink_to(0)`.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl<T: Float> Default for FlexibleMovingAverage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> MovingAverage<T> for FlexibleMovingAverage<T> {
    fn add(&mut self, datum: T) {
        self.buffer.push_back(datum);
    }

    /// Mean of all points currently held; NaN before the first point.
    fn value(&self) -> T {
        if self.buffer.is_empty() {
            return T::nan();
        }
        let sum = self
            .buffer
            .iter()
            .fold(T::zero(), |acc, &datum| acc + datum);
        sum / T::from(self.buffer.len()).unwrap()
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}
