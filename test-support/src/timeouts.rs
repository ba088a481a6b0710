use std::time::Duration;

use crate::is_ci;

/// Default request timeout.
pub const REQUEST_DEFAULT_SECS: u64 = 5;
pub const REQUEST_CI_SECS: u64 = 15;

/// Time allowed for a spawned server to exit after stdin closes.
pub const SHUTDOWN_SECS: u64 = 5;

/// Stress test timeout base.
pub const STRESS_CONCURRENT_BASE_SECS: u64 = 10;

/// Get request timeout based on environment.
pub fn request() -> Duration {
    if is_ci() {
        Duration::from_secs(REQUEST_CI_SECS)
    } else {
        Duration::from_secs(REQUEST_DEFAULT_SECS)
    }
}

/// Get shutdown timeout.
pub fn shutdown() -> Duration {
    Duration::from_secs(SHUTDOWN_SECS)
}

/// Get stress test timeout with multiplier for CI.
pub fn stress_timeout(base_secs: u64) -> Duration {
    let secs = if is_ci() { base_secs * 3 } else { base_secs };
    Duration::from_secs(secs)
}
