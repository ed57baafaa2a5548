//! Built-in accumulating statistics.
//!
//! ## Purpose
//!
//! This module provides the five built-in statistics that fold raw sample
//! points: [`Count`], [`Sum`], [`SumOfSquares`], [`Min`], and [`Max`]. Each
//! is a seed plus a pure O(1) fold step; the registry owns the state.
//!
//! ## Design notes
//!
//! * **Seeds are identities**: the seed of each fold is chosen so that the
//!   result is well defined before any point is seen (0 for the additive
//!   folds, +/- infinity for the extrema).
//! * **Order independence**: all five folds are mathematically commutative
//!   reductions; floating-point summation order may perturb results only at
//!   rounding-error scale.
//!
//! ## Non-goals
//!
//! * No compensated (Kahan) summation; the engine specifies plain IEEE
//!   accumulation and documents the precision caveat instead.

// External dependencies
use num_traits::Float;

// Internal dependencies
use super::{Function, StatId, Statistic};

// ============================================================================
// Fold Steps
// ============================================================================

fn count<T: Float>(state: T, _point: T) -> T {
    state + T::one()
}

fn sum<T: Float>(state: T, point: T) -> T {
    state + point
}

fn sum_of_squares<T: Float>(state: T, point: T) -> T {
    state + point * point
}

fn min<T: Float>(state: T, point: T) -> T {
    if point < state {
        point
    } else {
        state
    }
}

fn max<T: Float>(state: T, point: T) -> T {
    if point > state {
        point
    } else {
        state
    }
}

// ============================================================================
// Built-in Statistics
// ============================================================================

/// Number of sample points seen. Seed 0, +1 per point.
pub struct Count;

impl<T: Float> Statistic<T> for Count {
    const ID: StatId = StatId::new("count");

    fn function() -> Function<T> {
        Function::Accumulating {
            seed: T::zero(),
            update: count::<T>,
        }
    }
}

/// Sum of all sample points. Seed 0.
pub struct Sum;

impl<T: Float> Statistic<T> for Sum {
    const ID: StatId = StatId::new("sum");

    fn function() -> Function<T> {
        Function::Accumulating {
            seed: T::zero(),
            update: sum::<T>,
        }
    }
}

/// Sum of squared sample points. Seed 0.
pub struct SumOfSquares;

impl<T: Float> Statistic<T> for SumOfSquares {
    const ID: StatId = StatId::new("sum_of_squares");

    fn function() -> Function<T> {
        Function::Accumulating {
            seed: T::zero(),
            update: sum_of_squares::<T>,
        }
    }
}

/// Smallest sample point seen. Seed +infinity, so an empty population
/// reports +infinity rather than an error.
pub struct Min;

impl<T: Float> Statistic<T> for Min {
    const ID: StatId = StatId::new("min");

    fn function() -> Function<T> {
        Function::Accumulating {
            seed: T::infinity(),
            update: min::<T>,
        }
    }
}

/// Largest sample point seen. Seed -infinity.
pub struct Max;

impl<T: Float> Statistic<T> for Max {
    const ID: StatId = StatId::new("max");

    fn function() -> Function<T> {
        Function::Accumulating {
            seed: T::neg_infinity(),
            update: max::<T>,
        }
    }
}
