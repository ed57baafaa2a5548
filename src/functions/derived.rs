//! Built-in derived statistics.
//!
//! ## Purpose
//!
//! This module provides the statistics defined in terms of other statistics:
//! [`Average`], [`UncorrectedVariance`] (population variance), and
//! [`UnbiasedVariance`] (sample variance with Bessel's correction). Derived
//! statistics never see raw sample points; they read their dependencies'
//! current results through handles captured once at registration.
//!
//! ## Design notes
//!
//! * **Shared sub-computations**: dependency registration is idempotent, so
//!   registering both `Average` and `UncorrectedVariance` yields exactly one
//!   `Count` instance, updated once per point.
//! * **Boundary behavior is arithmetic, not errors**: an empty population
//!   makes `Average` evaluate 0/0 = NaN; a singleton population makes
//!   `UnbiasedVariance` divide by zero. Both are defined floating-point
//!   outcomes and are preserved exactly.
//!
//! ## Invariants
//!
//! * Dependency order inside each `declare` matches the index order the
//!   paired `eval` reads; the two are private to one statistic and change
//!   together.
//! * Every `eval` is recomputed from current dependency results on each
//!   call; nothing is cached.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use super::accumulating::{Count, Sum, SumOfSquares};
use super::{Function, StatId, Statistic};
use crate::engine::aggregator::Aggregator;
use crate::engine::handle::Handle;
use crate::primitives::errors::AggregateError;

// ============================================================================
// Average
// ============================================================================

// Dependency order: [Sum, Count].
fn average_declare<T: Float>(
    agg: &mut Aggregator<T>,
) -> Result<Vec<Handle<T>>, AggregateError> {
    Ok(vec![agg.register::<Sum>()?, agg.register::<Count>()?])
}

fn average_eval<T: Float>(deps: &[Handle<T>]) -> T {
    deps[0].result() / deps[1].result()
}

/// Arithmetic mean: Sum / Count.
///
/// Before any point is aggregated the result is 0/0 = NaN.
pub struct Average;

impl<T: Float> Statistic<T> for Average {
    const ID: StatId = StatId::new("average");

    fn function() -> Function<T> {
        Function::Derived {
            declare: average_declare::<T>,
            eval: average_eval::<T>,
        }
    }
}

// ============================================================================
// Uncorrected (Population) Variance
// ============================================================================

// Dependency order: [SumOfSquares, Count, Average].
fn uncorrected_variance_declare<T: Float>(
    agg: &mut Aggregator<T>,
) -> Result<Vec<Handle<T>>, AggregateError> {
    Ok(vec![
        agg.register::<SumOfSquares>()?,
        agg.register::<Count>()?,
        agg.register::<Average>()?,
    ])
}

fn uncorrected_variance_eval<T: Float>(deps: &[Handle<T>]) -> T {
    let mean = deps[2].result();
    deps[0].result() / deps[1].result() - mean * mean
}

/// Population variance: SumOfSquares / Count - Average^2.
///
/// Uncorrected in the sense that it divides by N, treating the data as the
/// entire population. NaN for an empty population.
pub struct UncorrectedVariance;

impl<T: Float> Statistic<T> for UncorrectedVariance {
    const ID: StatId = StatId::new("uncorrected_variance");

    fn function() -> Function<T> {
        Function::Derived {
            declare: uncorrected_variance_declare::<T>,
            eval: uncorrected_variance_eval::<T>,
        }
    }
}

// ============================================================================
// Unbiased (Sample) Variance
// ============================================================================

// Dependency order: [UncorrectedVariance, Count].
fn unbiased_variance_declare<T: Float>(
    agg: &mut Aggregator<T>,
) -> Result<Vec<Handle<T>>, AggregateError> {
    Ok(vec![
        agg.register::<UncorrectedVariance>()?,
        agg.register::<Count>()?,
    ])
}

fn unbiased_variance_eval<T: Float>(deps: &[Handle<T>]) -> T {
    let count = deps[1].result();
    deps[0].result() * count / (count - T::one())
}

/// Sample variance: UncorrectedVariance * Count / (Count - 1).
///
/// The Count / (Count - 1) factor is Bessel's correction, which removes the
/// bias of the population estimator when the data is a sample. For a
/// singleton population the correction divides by zero, producing infinity
/// (or NaN when the uncorrected variance is exactly 0); this is never an
/// error.
pub struct UnbiasedVariance;

impl<T: Float> Statistic<T> for UnbiasedVariance {
    const ID: StatId = StatId::new("unbiased_variance");

    fn function() -> Function<T> {
        Function::Derived {
            declare: unbiased_variance_declare::<T>,
            eval: unbiased_variance_eval::<T>,
        }
    }
}
