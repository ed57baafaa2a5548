//! Scalar root finders: Newton's method and the secant method.
//!
//! ## Purpose
//!
//! This module finds roots (zeros) of scalar functions by successive
//! approximation, converging to a requested number of decimal digits. It is
//! used elsewhere to invert cash-flow formulas for interest-rate
//! calculation, and is a black box to the aggregation engine.
//!
//! ## Design notes
//!
//! * **Precision digits**: the stopping tolerance is half a unit in the last
//!   requested decimal place, and the returned root is rounded to that
//!   place.
//! * **Bounded iteration**: on failure to converge the iteration stops after
//!   a fixed bound and the current estimate is returned; the value is then
//!   unspecified and possibly non-finite. Failure is not an error.
//!
//! ## Non-goals
//!
//! * No bracketing or global root search; convergence depends on the
//!   starting point(s).
//! * No complex roots.

// External dependencies
use num_traits::Float;

// Iteration bound on failure to converge.
const MAX_ITERATIONS: usize = 1000;

// ============================================================================
// Root Finders
// ============================================================================

/// Find a root of `f` by Newton's method.
///
/// `f_prime` is the derivative of `f`; `x0` the starting value, ideally
/// close to the root; `precision_digits` the number of decimal digits with
/// which the root is to be found.
///
/// Returns the root rounded to `precision_digits` decimal places. On
/// failure to converge the returned value is unspecified and possibly
/// non-finite.
///
/// # Example
///
/// ```
/// use onepass_rs::math::solve::solve_newton;
///
/// // Root of x^2 - 4 near x0 = 3.
/// let root = solve_newton(|x: f64| x * x - 4.0, |x| 2.0 * x, 3.0, 9);
/// assert!((root - 2.0).abs() < 1e-9);
/// ```
pub fn solve_newton<T, F, D>(f: F, f_prime: D, x0: T, precision_digits: u8) -> T
where
    T: Float,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    let tol = precision_tolerance::<T>(precision_digits);

    let mut prev = x0;
    let mut next = prev - f(prev) / f_prime(prev);
    let mut remaining = MAX_ITERATIONS;

    while tol <= (next - prev).abs() && remaining > 0 {
        prev = next;
        next = prev - f(prev) / f_prime(prev);
        remaining -= 1;
    }

    round_to(next, precision_digits)
}

/// Find a root of `f` by the secant method.
///
/// `x0` and `x1` are two starting values, ideally close to the root;
/// `precision_digits` the number of decimal digits with which the root is to
/// be found.
///
/// Returns the root rounded to `precision_digits` decimal places. With
/// coincident starting values the secant is undefined and NaN is returned;
/// on failure to converge the returned value is unspecified and possibly
/// non-finite.
pub fn solve_secant<T, F>(f: F, mut x0: T, mut x1: T, precision_digits: u8) -> T
where
    T: Float,
    F: Fn(T) -> T,
{
    if x0 == x1 {
        return T::nan();
    }

    let tol = precision_tolerance::<T>(precision_digits);
    let mut remaining = MAX_ITERATIONS;

    while tol <= (x1 - x0).abs() && remaining > 0 {
        let f0 = f(x0);
        let f1 = f(x1);
        let x2 = x1 - f1 * (x1 - x0) / (f1 - f0);

        x0 = x1;
        x1 = x2;
        remaining -= 1;
    }

    round_to(x1, precision_digits)
}

// ============================================================================
// Helpers
// ============================================================================

// Half a unit in the last requested decimal place.
fn precision_tolerance<T: Float>(precision_digits: u8) -> T {
    let ten = T::from(10.0).unwrap();
    let two = T::one() + T::one();
    ten.powi(-(precision_digits as i32)) / two
}

fn round_to<T: Float>(value: T, precision_digits: u8) -> T {
    let ten = T::from(10.0).unwrap();
    let scale = ten.powi(precision_digits as i32);
    (value * scale).round() / scale
}
