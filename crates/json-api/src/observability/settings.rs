//! Request logging knobs read on every request.

use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Duration,
};

use crate::config::ServerConfig;

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(1_000);
static PARENT_PROPAGATION: AtomicBool = AtomicBool::new(false);

pub(super) fn apply_runtime_config(config: &ServerConfig) {
    let threshold_ms =
        u64::try_from(config.logging.slow_request_threshold.as_millis()).unwrap_or(u64::MAX);

    SLOW_REQUEST_THRESHOLD_MS.store(threshold_ms, Ordering::Relaxed);
    PARENT_PROPAGATION.store(config.tracing.propagates_parent(), Ordering::Relaxed);
}

pub(super) fn slow_request_threshold() -> Duration {
    Duration::from_millis(SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed))
}

pub(super) fn parent_propagation() -> bool {
    PARENT_PROPAGATION.load(Ordering::Relaxed)
}
