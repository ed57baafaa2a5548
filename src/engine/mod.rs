//! Aggregation engine: the registry and its result handles.
//!
//! ## Purpose
//!
//! This layer owns the dependency-resolution and deduplication algorithm of
//! the crate. [`aggregator::Aggregator`] registers statistic functions keyed
//! by identity and fans each sample point out to every accumulating function
//! exactly once; [`handle::Handle`] is the read path for results.

pub mod aggregator;
pub mod handle;
