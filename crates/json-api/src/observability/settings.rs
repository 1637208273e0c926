//! Request middleware knobs, fixed once at startup.

use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Duration,
};

use crate::config::observability::ObservabilityConfig;

static SLOW_REQUEST_MS: AtomicU64 = AtomicU64::new(1_000);
static TRUST_TRACEPARENT: AtomicBool = AtomicBool::new(false);

pub(super) fn apply_runtime_config(config: &ObservabilityConfig) {
    SLOW_REQUEST_MS.store(config.slow_request_threshold_ms, Ordering::Relaxed);

    // Caller trace context only matters when spans are exported.
    TRUST_TRACEPARENT.store(
        config.otel_enabled && config.otel_parent_propagation_enabled,
        Ordering::Relaxed,
    );
}

/// Requests slower than this are logged as warnings.
pub(super) fn slow_request_threshold() -> Duration {
    Duration::from_millis(SLOW_REQUEST_MS.load(Ordering::Relaxed))
}

pub(super) fn otel_parent_propagation_enabled() -> bool {
    TRUST_TRACEPARENT.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_one_second() {
        assert_eq!(slow_request_threshold(), Duration::from_secs(1));
    }
}
