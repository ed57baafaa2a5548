//! Independent numeric utilities.
//!
//! ## Purpose
//!
//! This layer holds the simple numeric collaborators that ship alongside the
//! aggregation engine but do not depend on it (nor it on them): scalar
//! root finders, linear interpolation, and moving averages.

pub mod interpolate;
pub mod moving;
pub mod solve;
