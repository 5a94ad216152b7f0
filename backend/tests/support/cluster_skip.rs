//! Skip policy for suites that need the embedded cluster.
//!
//! Machines without the PostgreSQL binaries (or network access to fetch them)
//! cannot start the cluster. Such runs skip the database suites with a
//! `SKIP-TEST-CLUSTER` marker. CI sets `STOCKFLOW_REQUIRE_TEST_CLUSTER` so a
//! broken cluster fails loudly there instead.

fn is_truthy(variable: &str) -> bool {
    std::env::var(variable)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Returns true when cluster setup failures must fail the run.
///
/// `SKIP_TEST_CLUSTER` wins over `STOCKFLOW_REQUIRE_TEST_CLUSTER`.
pub fn cluster_is_required() -> bool {
    !is_truthy("SKIP_TEST_CLUSTER") && is_truthy("STOCKFLOW_REQUIRE_TEST_CLUSTER")
}

/// Handles embedded cluster setup failures consistently across suites.
///
/// Prints a skip marker and returns `None`, or panics when the cluster is
/// required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if cluster_is_required() {
        panic!("Test cluster setup failed: {reason}. Unset STOCKFLOW_REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
