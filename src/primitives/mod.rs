//! Primitive types shared across the crate.
//!
//! ## Purpose
//!
//! This layer contains the foundational types that every other layer builds
//! on. At present that is the error taxonomy; it deliberately has no
//! dependency on the function, engine, or math layers.

pub mod errors;
