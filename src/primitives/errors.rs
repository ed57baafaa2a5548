//! Error types for registration and lookup.
//!
//! ## Purpose
//!
//! This module defines the error taxonomy of the aggregation engine. All
//! errors are raised synchronously at the triggering call; there is no
//! deferred or batched reporting.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: registration errors are fatal and surface immediately.
//! * **Recoverable lookups**: `NotRegistered` is the one recoverable error;
//!   registering the missing statistic and retrying resolves it.
//! * **Numerics are not errors**: NaN and infinity results from boundary
//!   populations (empty, singleton) are defined floating-point outcomes and
//!   are never converted into this type.
//!
//! ## Invariants
//!
//! * Every variant carries the static name of the statistic involved, so
//!   messages are meaningful without a backtrace.

// External dependencies
use core::fmt;

// ============================================================================
// Error Type
// ============================================================================

/// Errors raised by statistic registration and result lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// A registered statistic matches neither capability: it folds no sample
    /// points and declares no dependencies to derive from.
    InvalidFunctionKind {
        /// Identity tag of the offending statistic.
        name: &'static str,
    },

    /// A blind result lookup named an identity that was never registered.
    ///
    /// Recoverable: register the statistic, then retry. The handle returned
    /// by `register` avoids this failure mode structurally.
    NotRegistered {
        /// Identity tag that was looked up.
        name: &'static str,
    },

    /// A dependency declaration re-entered an identity whose registration is
    /// still in progress, which would recurse forever.
    CyclicDependency {
        /// Identity tag at which the cycle closed.
        name: &'static str,
    },
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::InvalidFunctionKind { name } => {
                write!(
                    f,
                    "Statistic '{}' is neither accumulating nor derived \
                     (it declares no dependencies and folds no points)",
                    name
                )
            }
            AggregateError::NotRegistered { name } => {
                write!(
                    f,
                    "Statistic '{}' was not registered with this aggregator",
                    name
                )
            }
            AggregateError::CyclicDependency { name } => {
                write!(
                    f,
                    "Cyclic dependency detected while registering statistic '{}'",
                    name
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AggregateError {}
