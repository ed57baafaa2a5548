//! # onepass-rs — single-pass statistical aggregation for Rust
//!
//! A dependency-aware aggregation engine: given a stream of numeric sample
//! points visited exactly once, it computes an arbitrary, caller-selected set
//! of summary statistics, including statistics defined in terms of other
//! statistics (variance depends on mean and count; mean depends on sum and
//! count). Shared sub-computations execute only once regardless of how many
//! dependent statistics need them, and registering the same statistic twice
//! has no duplicate cost.
//!
//! ## Quick Start
//!
//! ```rust
//! use onepass_rs::prelude::*;
//!
//! let mut stats = Aggregator::<f64>::new();
//!
//! // Registering UncorrectedVariance pulls in SumOfSquares, Count, Sum and
//! // Average; registering Average afterwards reuses those same instances.
//! let min = stats.register::<Min>()?;
//! let max = stats.register::<Max>()?;
//! let variance = stats.register::<UncorrectedVariance>()?;
//! let average = stats.register::<Average>()?;
//!
//! // One pass over the population.
//! for point in [0.0, 2.0, -9.0, 99.0, -3.0] {
//!     stats.aggregate(point);
//! }
//!
//! assert_eq!(min.result(), -9.0);
//! assert_eq!(max.result(), 99.0);
//! assert!((average.result() - 17.8).abs() < 1e-9);
//! assert!((variance.result() - 1662.16).abs() < 1e-9);
//! # Ok::<(), AggregateError>(())
//! ```
//!
//! ## How it works
//!
//! A statistic is either **accumulating** (folds one sample point at a time
//! into private scalar state, O(1) per point) or **derived** (pure arithmetic
//! over other statistics' current results, never seeing raw points). The
//! [`Aggregator`](engine::aggregator::Aggregator) registry deduplicates
//! statistics by a static identity tag, recursively registers a derived
//! statistic's dependencies before the statistic itself, and fans each sample
//! point out to every accumulating instance exactly once.
//!
//! Results are read off the [`Handle`](engine::handle::Handle) returned at
//! registration, at any time; derived results are recomputed from current
//! dependency results on every read.
//!
//! ## Boundary behavior
//!
//! Empty and singleton populations produce the defined floating-point
//! outcomes, never errors: `Average` of nothing is 0/0 = NaN, and
//! `UnbiasedVariance` of a single point divides by zero. Floating-point
//! summation order may perturb results at rounding-error scale; all built-in
//! statistics are order-independent reductions beyond that.
//!
//! ## Custom statistics
//!
//! The built-ins get no special treatment: implement
//! [`Statistic`](functions::Statistic) for your own type to add an
//! accumulating fold or a derived formula, and register it like any other.
//!
//! ## Concurrency
//!
//! Execution is single-threaded and synchronous. A registry requires `&mut`
//! access for registration and aggregation and its handles are neither `Send`
//! nor `Sync`; serialize a full pass before reading results.
//!
//! ## Feature Flags
//!
//! * `std` (default): standard library support. Disable for `no_std`
//!   environments (an allocator is still required).

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - error types.
pub mod primitives;

// Layer 2: Functions - statistic contracts and the built-in statistics.
pub mod functions;

// Layer 3: Engine - the aggregator registry and result handles.
pub mod engine;

// Layer 4: Math - independent numeric collaborators (root finders,
// moving averages). No dependency in either direction with the engine.
pub mod math;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access to
/// the most commonly used types:
///
/// ```
/// use onepass_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::engine::aggregator::Aggregator;
    pub use crate::engine::handle::Handle;
    pub use crate::functions::{
        Average, Count, Function, Max, Min, StatId, Statistic, Sum, SumOfSquares,
        UnbiasedVariance, UncorrectedVariance,
    };
    pub use crate::math::interpolate::interpolate;
    pub use crate::math::moving::{FixedMovingAverage, FlexibleMovingAverage, MovingAverage};
    pub use crate::math::solve::{solve_newton, solve_secant};
    pub use crate::primitives::errors::AggregateError;
}
