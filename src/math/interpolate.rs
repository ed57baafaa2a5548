//! Linear interpolation through two known points.
//!
//! ## Purpose
//!
//! This module provides straight-line interpolation (or extrapolation) given
//! two known points, a sibling of the root finders in [`solve`](super::solve).
//!
//! ## Design notes
//!
//! * **Extrapolation is interpolation**: the line through the two points is
//!   evaluated wherever asked; no clamping to the `[x1, x2]` interval.
//! * **Degenerate input is arithmetic, not a panic**: coincident abscissae
//!   define no line, so NaN is returned, matching how the root finders
//!   handle undefined configurations.

// External dependencies
use num_traits::Float;

// ============================================================================
// Interpolation
// ============================================================================

/// Evaluate at `x` the line through `(x1, y1)` and `(x2, y2)`.
///
/// `x` may lie outside `[x1, x2]`, in which case the line is extrapolated.
/// With coincident abscissae (`x1 == x2`) no line is defined and NaN is
/// returned.
///
/// # Example
///
/// ```
/// use onepass_rs::math::interpolate::interpolate;
///
/// // Midpoint of the line through (0, 10) and (2, 30).
/// assert_eq!(interpolate(0.0, 10.0, 2.0, 30.0, 1.0), 20.0);
/// ```
pub fn interpolate<T: Float>(x1: T, y1: T, x2: T, y2: T, x: T) -> T {
    if x1 == x2 {
        return T::nan();
    }
    y1 + (y2 - y1) * (x - x1) / (x2 - x1)
}
