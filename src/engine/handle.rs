//! Result handles into a registry's instance table.
//!
//! ## Purpose
//!
//! This module defines [`Handle`], the reference a caller (or a derived
//! statistic) holds to a registered statistic instance. A handle is captured
//! once at registration and reads results directly, with no registry
//! parameter; this removes the stale/mismatched-registry hazard of a
//! lookup-based read path.
//!
//! ## Design notes
//!
//! * **Shared, not owning**: handles are cheap `Rc` clones of the instance
//!   the registry created. Multiple derived statistics holding handles to
//!   the same dependency see the same state; the registry remains the sole
//!   creator of instances.
//! * **Reads never mutate**: accumulator state is mutated only by the
//!   registry's per-point fan-out. A handle read is a `Cell::get` or pure
//!   arithmetic over further handles.
//! * **Single-threaded by construction**: `Rc` + `Cell` make handles `!Send`
//!   and `!Sync`, matching the engine's concurrency contract.
//!
//! ## Invariants
//!
//! * A derived instance's dependency handles are fully registered before the
//!   derived result is ever read.
//! * Handles returned before `clear()` read detached state afterwards and
//!   must not be used.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{rc::Rc, vec::Vec};
#[cfg(feature = "std")]
use std::{rc::Rc, vec::Vec};

// External dependencies
use core::cell::Cell;
use core::fmt;
use num_traits::Float;

// Internal dependencies
use crate::functions::StatId;

// ============================================================================
// Instance State
// ============================================================================

/// Private state of one accumulating instance. Mutated only by the
/// registry's fan-out through the stored fold step.
pub(crate) struct AccumState<T: Float> {
    pub(crate) id: StatId,
    pub(crate) value: Cell<T>,
    pub(crate) update: fn(T, T) -> T,
}

/// State of one derived instance: the dependency handles captured at
/// registration plus the pure evaluation step.
pub(crate) struct DerivedState<T: Float> {
    pub(crate) id: StatId,
    pub(crate) deps: Vec<Handle<T>>,
    pub(crate) eval: fn(&[Handle<T>]) -> T,
}

pub(crate) enum Node<T: Float> {
    Accumulating(Rc<AccumState<T>>),
    Derived(Rc<DerivedState<T>>),
}

impl<T: Float> Clone for Node<T> {
    fn clone(&self) -> Self {
        match self {
            Node::Accumulating(state) => Node::Accumulating(Rc::clone(state)),
            Node::Derived(state) => Node::Derived(Rc::clone(state)),
        }
    }
}

// ============================================================================
// Handle
// ============================================================================

/// Live reference to a registered statistic instance.
///
/// Returned by [`Aggregator::register`](crate::engine::aggregator::Aggregator::register);
/// reads results at any time without a second lookup. Reading mid-pass
/// yields a mathematically well-defined but not-yet-final value.
pub struct Handle<T: Float> {
    node: Node<T>,
}

impl<T: Float> Handle<T> {
    pub(crate) fn accumulating(state: Rc<AccumState<T>>) -> Self {
        Self {
            node: Node::Accumulating(state),
        }
    }

    pub(crate) fn derived(state: Rc<DerivedState<T>>) -> Self {
        Self {
            node: Node::Derived(state),
        }
    }

    /// Identity of the statistic this handle reads.
    #[inline]
    pub fn id(&self) -> StatId {
        match &self.node {
            Node::Accumulating(state) => state.id,
            Node::Derived(state) => state.id,
        }
    }

    /// Current result of the statistic.
    ///
    /// O(1) for accumulating statistics; cheap arithmetic recomputed from
    /// current dependency results for derived ones. Callable at any time,
    /// including before any point is aggregated.
    #[inline]
    pub fn result(&self) -> T {
        match &self.node {
            Node::Accumulating(state) => state.value.get(),
            Node::Derived(state) => (state.eval)(&state.deps),
        }
    }
}

impl<T: Float> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<T: Float> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle").field("id", &self.id()).finish()
    }
}
