//! Statistic function contracts and built-in statistics.
//!
//! ## Purpose
//!
//! This layer defines the smallest unit of computation in the engine: a
//! statistic function. A statistic is either *accumulating* (folds one sample
//! point at a time into private scalar state, O(1) per point) or *derived*
//! (computes its result from other statistics' current results, consuming no
//! raw points). The [`Statistic`] trait ties a static identity tag to one of
//! the two capabilities.
//!
//! ## Design notes
//!
//! * **Static identity**: each statistic carries a compile-time [`StatId`]
//!   tag; deduplication is a tag comparison, never runtime type inspection.
//! * **Capability-tagged union**: [`Function`] makes the accumulating/derived
//!   split explicit data, so the registry dispatches on a tag rather than on
//!   downcasts.
//! * **Open set**: callers may implement [`Statistic`] for their own types;
//!   the built-ins get no special treatment from the registry.
//!
//! ## Key concepts
//!
//! * **Seed**: the accumulator state before any point is seen. Results are
//!   readable at any time, including before the first point.
//! * **Dependency declaration**: a derived statistic registers (idempotently)
//!   each identity it needs and keeps the returned handles; it is invoked
//!   exactly once, at first registration.
//!
//! ## Invariants
//!
//! * A derived `eval` is pure: recomputed on every call from current
//!   dependency results, never cached.
//! * `StatId` tags are unique per concrete statistic within one registry.
//!
//! ## Non-goals
//!
//! * No merging of partially aggregated state across registries.
//! * No weighted or windowed variants of the built-in statistics.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt;
use num_traits::Float;

// Internal dependencies
use crate::engine::aggregator::Aggregator;
use crate::engine::handle::Handle;
use crate::primitives::errors::AggregateError;

pub mod accumulating;
pub mod derived;

pub use accumulating::{Count, Max, Min, Sum, SumOfSquares};
pub use derived::{Average, UnbiasedVariance, UncorrectedVariance};

// ============================================================================
// Identity
// ============================================================================

/// Static identity tag used to deduplicate statistics within one registry.
///
/// Two statistics with the same `StatId` are the same statistic as far as a
/// registry is concerned: at most one live instance exists per tag. Built-in
/// tags are plain names (`"count"`, `"sum"`, ...); user-defined statistics
/// should namespace theirs (`"myapp.median"`) to avoid collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatId(&'static str);

impl StatId {
    /// Create an identity tag from a static name.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The name this tag was created with.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// ============================================================================
// Capability Contracts
// ============================================================================

/// Capability-tagged description of a statistic function.
///
/// The registry consumes this once, at first registration of the statistic's
/// identity, and never calls [`Statistic::function`] again for that identity.
pub enum Function<T: Float> {
    /// Folds raw sample points into private scalar state.
    Accumulating {
        /// State before any point is seen.
        seed: T,
        /// Pure fold step: `(state, point) -> state`. O(1), called exactly
        /// once per point per registry.
        update: fn(T, T) -> T,
    },

    /// Computes its result from other statistics' current results.
    Derived {
        /// Registers (idempotently) every dependency and returns their
        /// handles, in the order `eval` expects them. Called exactly once,
        /// at first registration. May recursively register further
        /// identities.
        declare: fn(&mut Aggregator<T>) -> Result<Vec<Handle<T>>, AggregateError>,
        /// Pure arithmetic over current dependency results. Recomputed on
        /// every read, never cached.
        eval: fn(&[Handle<T>]) -> T,
    },
}

/// A statistic that can be registered with an [`Aggregator`].
///
/// Implementors pair a unique compile-time identity with one of the two
/// capabilities in [`Function`]. The type itself is never instantiated; all
/// state lives inside the registry.
///
/// # Example
///
/// A custom accumulating statistic (sum of absolute values):
///
/// ```
/// use onepass_rs::prelude::*;
///
/// struct AbsSum;
///
/// impl<T: num_traits::Float> Statistic<T> for AbsSum {
///     const ID: StatId = StatId::new("example.abs_sum");
///
///     fn function() -> Function<T> {
///         Function::Accumulating {
///             seed: T::zero(),
///             update: |state, point| state + point.abs(),
///         }
///     }
/// }
///
/// let mut stats = Aggregator::<f64>::new();
/// let abs_sum = stats.register::<AbsSum>()?;
/// for point in [3.0, -4.0] {
///     stats.aggregate(point);
/// }
/// assert_eq!(abs_sum.result(), 7.0);
/// # Ok::<(), AggregateError>(())
/// ```
pub trait Statistic<T: Float>: 'static {
    /// Identity tag, unique per concrete statistic.
    const ID: StatId;

    /// The capability this statistic provides.
    fn function() -> Function<T>;
}
