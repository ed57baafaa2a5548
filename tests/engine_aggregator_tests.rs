//! Tests for the aggregator registry.
//!
//! These tests verify the registry's core guarantees:
//! - Idempotent registration and instance sharing
//! - Deduplicated recursive dependency registration
//! - Single-pass fan-out semantics
//! - Error taxonomy (cyclic, invalid-kind, not-registered)
//! - Reset via `clear()`
//!
//! ## Test Organization
//!
//! 1. **Registration** - idempotency, sharing, ordering
//! 2. **Aggregation** - fan-out, late registration, mid-pass reads
//! 3. **Errors** - cyclic and invalid custom statistics, blind lookup
//! 4. **Lifecycle** - clear and re-registration

use approx::assert_abs_diff_eq;

use onepass_rs::prelude::*;

// ============================================================================
// Custom statistics used by the error-path tests
// ============================================================================

/// Accumulating custom statistic: sum of doubled points.
struct DoubledSum;

impl Statistic<f64> for DoubledSum {
    const ID: StatId = StatId::new("test.doubled_sum");

    fn function() -> Function<f64> {
        Function::Accumulating {
            seed: 0.0,
            update: |state, point| state + 2.0 * point,
        }
    }
}

/// Derived custom statistic that depends on itself.
struct Ouroboros;

impl Statistic<f64> for Ouroboros {
    const ID: StatId = StatId::new("test.ouroboros");

    fn function() -> Function<f64> {
        Function::Derived {
            declare: |agg| Ok(vec![agg.register::<Ouroboros>()?]),
            eval: |deps| deps[0].result(),
        }
    }
}

/// Two derived custom statistics that depend on each other.
struct PingStat;
struct PongStat;

impl Statistic<f64> for PingStat {
    const ID: StatId = StatId::new("test.ping");

    fn function() -> Function<f64> {
        Function::Derived {
            declare: |agg| Ok(vec![agg.register::<PongStat>()?]),
            eval: |deps| deps[0].result(),
        }
    }
}

impl Statistic<f64> for PongStat {
    const ID: StatId = StatId::new("test.pong");

    fn function() -> Function<f64> {
        Function::Derived {
            declare: |agg| Ok(vec![agg.register::<PingStat>()?]),
            eval: |deps| deps[0].result(),
        }
    }
}

/// Derived custom statistic that declares no dependencies: it folds no
/// points and derives from nothing, so it matches neither capability.
struct Hollow;

impl Statistic<f64> for Hollow {
    const ID: StatId = StatId::new("test.hollow");

    fn function() -> Function<f64> {
        Function::Derived {
            declare: |_| Ok(Vec::new()),
            eval: |_| f64::NAN,
        }
    }
}

// ============================================================================
// Registration Tests
// ============================================================================

/// Registering the same statistic twice returns the same instance and the
/// state is updated exactly once per point.
#[test]
fn test_registration_is_idempotent() {
    let mut stats = Aggregator::<f64>::new();

    let first = stats.register::<Count>().unwrap();
    let second = stats.register::<Count>().unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(first.id(), second.id());

    for point in [1.0, 2.0, 3.0] {
        stats.aggregate(point);
    }

    // One instance, one update per point, visible through both handles.
    assert_eq!(first.result(), 3.0);
    assert_eq!(second.result(), 3.0);
}

/// Registering Average and UncorrectedVariance shares one Count, one Sum,
/// and one SumOfSquares instance between them.
#[test]
fn test_dependencies_are_shared() {
    let mut stats = Aggregator::<f64>::new();

    let average = stats.register::<Average>().unwrap();
    let variance = stats.register::<UncorrectedVariance>().unwrap();

    // Sum, Count, Average, SumOfSquares, UncorrectedVariance: five distinct
    // instances, no duplicates.
    assert_eq!(stats.len(), 5);
    assert!(stats.is_registered(<Count as Statistic<f64>>::ID));
    assert!(stats.is_registered(<Sum as Statistic<f64>>::ID));
    assert!(stats.is_registered(<SumOfSquares as Statistic<f64>>::ID));

    for point in [2.0, 0.0, -5.0, 7.0, -3.0] {
        stats.aggregate(point);
    }

    // No double counting: the shared Count saw each point once.
    assert_eq!(stats.result_of(<Count as Statistic<f64>>::ID).unwrap(), 5.0);
    assert_abs_diff_eq!(average.result(), 0.2, epsilon = 1e-9);
    assert_abs_diff_eq!(variance.result(), 17.36, epsilon = 1e-9);
}

/// Registering a derived statistic first still registers its transitive
/// dependencies, before the statistic itself.
#[test]
fn test_recursive_registration() {
    let mut stats = Aggregator::<f64>::new();

    let variance = stats.register::<UnbiasedVariance>().unwrap();

    // UnbiasedVariance -> UncorrectedVariance -> {SumOfSquares, Count,
    // Average -> {Sum, Count}}: six distinct instances.
    assert_eq!(stats.len(), 6);

    for point in [0.0, 2.0, -9.0, 99.0, -3.0] {
        stats.aggregate(point);
    }
    assert_abs_diff_eq!(variance.result(), 2077.7, epsilon = 1e-9);
}

/// Custom accumulating statistics deduplicate and fan out like built-ins.
#[test]
fn test_custom_accumulating_statistic() {
    let mut stats = Aggregator::<f64>::new();

    let doubled = stats.register::<DoubledSum>().unwrap();
    stats.register::<DoubledSum>().unwrap();
    assert_eq!(stats.len(), 1);

    for point in [1.0, 2.0, 3.0] {
        stats.aggregate(point);
    }
    assert_eq!(doubled.result(), 12.0);
}

// ============================================================================
// Aggregation Tests
// ============================================================================

/// Statistics registered mid-pass see only the points aggregated after
/// their registration; registration is not retroactive.
#[test]
fn test_late_registration_is_not_retroactive() {
    let mut stats = Aggregator::<f64>::new();

    let sum = stats.register::<Sum>().unwrap();
    stats.aggregate(10.0);
    stats.aggregate(20.0);

    let count = stats.register::<Count>().unwrap();
    stats.aggregate(30.0);

    assert_eq!(sum.result(), 60.0);
    assert_eq!(count.result(), 1.0);
}

/// Reading a derived result mid-pass yields the well-defined value over the
/// points seen so far.
#[test]
fn test_mid_pass_read() {
    let mut stats = Aggregator::<f64>::new();

    let average = stats.register::<Average>().unwrap();
    stats.aggregate(1.0);
    stats.aggregate(3.0);
    assert_abs_diff_eq!(average.result(), 2.0, epsilon = 1e-9);

    stats.aggregate(8.0);
    assert_abs_diff_eq!(average.result(), 4.0, epsilon = 1e-9);
}

/// Results are re-readable any number of times after the pass completes.
#[test]
fn test_results_are_rereadable() {
    let mut stats = Aggregator::<f64>::new();

    let average = stats.register::<Average>().unwrap();
    for point in [1.0, 2.0, 3.0] {
        stats.aggregate(point);
    }

    for _ in 0..3 {
        assert_abs_diff_eq!(average.result(), 2.0, epsilon = 1e-9);
    }
}

// ============================================================================
// Error Tests
// ============================================================================

/// A self-referential dependency declaration is rejected instead of
/// recursing forever.
#[test]
fn test_self_cycle_is_detected() {
    let mut stats = Aggregator::<f64>::new();

    let err = stats.register::<Ouroboros>().unwrap_err();
    assert_eq!(
        err,
        AggregateError::CyclicDependency {
            name: "test.ouroboros"
        }
    );
}

/// A mutual dependency cycle is rejected at the identity where it closes.
#[test]
fn test_mutual_cycle_is_detected() {
    let mut stats = Aggregator::<f64>::new();

    let err = stats.register::<PingStat>().unwrap_err();
    assert_eq!(err, AggregateError::CyclicDependency { name: "test.ping" });
}

/// A derived statistic declaring no dependencies matches neither capability
/// and is rejected at registration.
#[test]
fn test_dependency_free_derived_is_invalid() {
    let mut stats = Aggregator::<f64>::new();

    let err = stats.register::<Hollow>().unwrap_err();
    assert_eq!(
        err,
        AggregateError::InvalidFunctionKind {
            name: "test.hollow"
        }
    );
    assert!(!stats.is_registered(<Hollow as Statistic<f64>>::ID));
}

/// The blind lookup path reports identities that were never registered;
/// registering then retrying recovers.
#[test]
fn test_blind_lookup_of_unregistered_identity() {
    let mut stats = Aggregator::<f64>::new();
    let min_id = <Min as Statistic<f64>>::ID;

    let err = stats.result_of(min_id).unwrap_err();
    assert_eq!(err, AggregateError::NotRegistered { name: "min" });

    stats.register::<Min>().unwrap();
    assert_eq!(stats.result_of(min_id).unwrap(), f64::INFINITY);
}

/// Error messages name the statistic involved.
#[test]
fn test_error_display() {
    let err = AggregateError::NotRegistered { name: "min" };
    assert_eq!(
        format!("{}", err),
        "Statistic 'min' was not registered with this aggregator"
    );

    let err = AggregateError::CyclicDependency { name: "test.ping" };
    assert_eq!(
        format!("{}", err),
        "Cyclic dependency detected while registering statistic 'test.ping'"
    );

    let err = AggregateError::InvalidFunctionKind { name: "test.hollow" };
    assert!(format!("{}", err).contains("neither accumulating nor derived"));
}

#[cfg(feature = "std")]
#[test]
fn test_error_is_std_error() {
    fn assert_error<T: std::error::Error>() {}
    assert_error::<AggregateError>();
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

/// After `clear()` the registry is indistinguishable from freshly
/// constructed.
#[test]
fn test_clear_resets_to_fresh_state() {
    let mut stats = Aggregator::<f64>::new();

    stats.register::<Average>().unwrap();
    for point in [1.0, 2.0, 3.0] {
        stats.aggregate(point);
    }
    assert!(!stats.is_empty());

    stats.clear();
    assert!(stats.is_empty());
    assert_eq!(stats.len(), 0);
    assert!(!stats.is_registered(<Count as Statistic<f64>>::ID));

    // Re-registration after clear starts from seeds again.
    let count = stats.register::<Count>().unwrap();
    assert_eq!(count.result(), 0.0);
    stats.aggregate(7.0);
    assert_eq!(count.result(), 1.0);
}

/// A failed registration leaves the failing identity unregistered, and the
/// registry keeps working.
#[test]
fn test_registry_usable_after_failed_registration() {
    let mut stats = Aggregator::<f64>::new();

    stats.register::<Ouroboros>().unwrap_err();
    assert!(!stats.is_registered(<Ouroboros as Statistic<f64>>::ID));

    let sum = stats.register::<Sum>().unwrap();
    stats.aggregate(5.0);
    assert_eq!(sum.result(), 5.0);
}
