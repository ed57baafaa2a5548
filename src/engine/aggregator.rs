//! The aggregator registry: deduplicated registration and single-pass fan-out.
//!
//! ## Purpose
//!
//! This module implements the core of the engine. An [`Aggregator`] owns the
//! set of registered statistic instances keyed by identity, performs
//! deduplicated recursive registration of dependencies, and fans each sample
//! point out to every accumulating instance exactly once per point.
//!
//! ## Design notes
//!
//! * **Idempotent registration**: registering an identity twice returns the
//!   existing instance's handle; there is no duplicate cost in the per-point
//!   loop.
//! * **Dependencies before dependents**: a derived statistic's dependency
//!   declaration runs before the statistic itself is appended, so the
//!   instance list is always topologically ordered and acyclic.
//! * **Bounded recursion**: an explicit in-flight stack turns a cyclic
//!   dependency declaration into an [`AggregateError::CyclicDependency`]
//!   instead of unbounded recursion.
//! * **Tag scan, not type inspection**: lookup compares static `StatId` tags
//!   over a short list; registries hold a handful of statistics, so a linear
//!   scan beats a hash map here.
//!
//! ## Key concepts
//!
//! * **Pass**: one complete traversal of the input through [`Aggregator::aggregate`].
//!   Statistics registered before point N see point N; late registration is
//!   not retroactive.
//! * **Update list**: the accumulating subset of the instance table, in
//!   first-registration order; derived instances never appear in it.
//!
//! ## Invariants
//!
//! * At most one live instance per identity per registry.
//! * `aggregate` is O(k) per point, k = number of distinct accumulating
//!   instances.
//! * After `clear()` the registry is indistinguishable from freshly
//!   constructed.
//!
//! ## Non-goals
//!
//! * No multi-pass or out-of-core computation; no persistence.
//! * No parallel accumulation; calls require `&mut self` and run to
//!   completion.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{rc::Rc, vec::Vec};
#[cfg(feature = "std")]
use std::{rc::Rc, vec::Vec};

// External dependencies
use core::cell::Cell;
use num_traits::Float;

// Internal dependencies
use crate::engine::handle::{AccumState, DerivedState, Handle};
use crate::functions::{Function, StatId, Statistic};
use crate::primitives::errors::AggregateError;

// ============================================================================
// Aggregator
// ============================================================================

/// Computes an arbitrary set of summary statistics by iterating only once
/// through the sample or population.
///
/// # Example
///
/// ```
/// use onepass_rs::prelude::*;
///
/// let mut stats = Aggregator::<f64>::new();
/// let min = stats.register::<Min>()?;
/// let variance = stats.register::<UnbiasedVariance>()?;
///
/// for point in [0.0, 2.0, -9.0, 99.0, -3.0] {
///     stats.aggregate(point);
/// }
///
/// assert_eq!(min.result(), -9.0);
/// assert!((variance.result() - 2077.7).abs() < 1e-9);
/// # Ok::<(), AggregateError>(())
/// ```
pub struct Aggregator<T: Float> {
    /// Every registered instance, in first-registration order.
    functions: Vec<Handle<T>>,
    /// The accumulating subset, in first-registration order; this is the
    /// per-point fan-out list.
    update_list: Vec<Rc<AccumState<T>>>,
    /// Identities whose registration is currently in progress, used to
    /// detect cyclic dependency declarations.
    in_flight: Vec<StatId>,
}

impl<T: Float> Aggregator<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            functions: Vec::new(),
            update_list: Vec::new(),
            in_flight: Vec::new(),
        }
    }

    /// Register the statistic `F`, returning a live handle to its instance.
    ///
    /// Idempotent: if `F`'s identity is already registered, the existing
    /// instance's handle is returned unchanged. Otherwise a new instance is
    /// created; a derived statistic's dependency declaration runs first and
    /// may recursively register further identities, each idempotently.
    ///
    /// # Errors
    ///
    /// * [`AggregateError::CyclicDependency`] if `F`'s declaration reaches
    ///   back to an identity still being registered.
    /// * [`AggregateError::InvalidFunctionKind`] if `F` is derived but
    ///   declares no dependencies, so it matches neither capability in
    ///   substance.
    pub fn register<F: Statistic<T>>(&mut self) -> Result<Handle<T>, AggregateError> {
        if let Some(existing) = self.find(F::ID) {
            return Ok(existing.clone());
        }
        if self.in_flight.contains(&F::ID) {
            return Err(AggregateError::CyclicDependency {
                name: F::ID.name(),
            });
        }

        let handle = match F::function() {
            Function::Accumulating { seed, update } => {
                let state = Rc::new(AccumState {
                    id: F::ID,
                    value: Cell::new(seed),
                    update,
                });
                self.update_list.push(Rc::clone(&state));
                Handle::accumulating(state)
            }
            Function::Derived { declare, eval } => {
                self.in_flight.push(F::ID);
                let declared = declare(self);
                self.in_flight.pop();

                let deps = declared?;
                if deps.is_empty() {
                    return Err(AggregateError::InvalidFunctionKind {
                        name: F::ID.name(),
                    });
                }
                Handle::derived(Rc::new(DerivedState {
                    id: F::ID,
                    deps,
                    eval,
                }))
            }
        };

        self.functions.push(handle.clone());
        Ok(handle)
    }

    /// Feed one sample point to every accumulating instance, in
    /// first-registration order, exactly once each.
    ///
    /// O(k) per point, k = number of distinct accumulating instances.
    /// Derived instances never see raw points. The full input must traverse
    /// this entry point exactly once per pass.
    #[inline]
    pub fn aggregate(&mut self, point: T) {
        for state in &self.update_list {
            state.value.set((state.update)(state.value.get(), point));
        }
    }

    /// Current result of the identity `id`, looked up blindly.
    ///
    /// This is the lookup-shaped read path; prefer reading off the handle
    /// returned by [`register`](Self::register), which cannot name an
    /// unregistered identity.
    ///
    /// # Errors
    ///
    /// [`AggregateError::NotRegistered`] if `id` was never registered.
    pub fn result_of(&self, id: StatId) -> Result<T, AggregateError> {
        self.find(id)
            .map(Handle::result)
            .ok_or(AggregateError::NotRegistered { name: id.name() })
    }

    /// Whether the identity `id` is registered.
    pub fn is_registered(&self, id: StatId) -> bool {
        self.find(id).is_some()
    }

    /// Number of registered instances, accumulating and derived together.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no statistic is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Discard every instance, returning the registry to its freshly
    /// constructed state.
    ///
    /// Handles returned before this call read detached state and must not
    /// be used afterwards.
    pub fn clear(&mut self) {
        self.functions.clear();
        self.update_list.clear();
        self.in_flight.clear();
    }

    fn find(&self, id: StatId) -> Option<&Handle<T>> {
        self.functions.iter().find(|handle| handle.id() == id)
    }
}

impl<T: Float> Default for Aggregator<T> {
    fn default() -> Self {
        Self::new()
    }
}
