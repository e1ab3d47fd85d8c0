//! Skip policy for suites that need the embedded PostgreSQL cluster.
//!
//! Hosts that cannot start the cluster may set `SKIP_TEST_CLUSTER` to turn
//! setup failures into skips instead of panics.

/// Whether `SKIP_TEST_CLUSTER` holds "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Turn a cluster setup failure into a skip or a panic.
///
/// Returns `None` after printing a skip marker when skipping is enabled, and
/// panics otherwise so broken CI is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
