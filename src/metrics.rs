//! Prometheus metrics collection for stashwarn.
//!
//! Exposed on the optional `/metrics` endpoint:
//!
//! - `stashwarn_uncover_events_total{outcome}` - Uncover events by how they ended
//! - `stashwarn_violations_total` - Confirmed violations
//! - `stashwarn_notifications_total{result}` - Webhook deliveries by result
//! - `stashwarn_decoys_placed_total` - Stashes turned into decoys
//! - `stashwarn_commands_total{action}` - Stash command invocations

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Uncover events by outcome (already_open, exempt, owner_unresolved, authorized, violation).
pub static UNCOVER_EVENTS: OnceLock<IntCounterVec> = OnceLock::new();

/// Confirmed violations.
pub static VIOLATIONS: OnceLock<IntCounter> = OnceLock::new();

/// Webhook notifications by delivery result.
pub static NOTIFICATIONS: OnceLock<IntCounterVec> = OnceLock::new();

/// Stashes converted into decoys.
pub static DECOYS_PLACED: OnceLock<IntCounter> = OnceLock::new();

/// Stash command invocations by action.
pub static COMMANDS: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Call once at startup before any metrics are recorded. Until then every
/// `record_*` helper is a no-op.
pub fn init() {
    let r = registry();

    // Helper macro to register metric
    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(UNCOVER_EVENTS, IntCounterVec::new(Opts::new("stashwarn_uncover_events_total", "Stash uncover events by outcome"), &["outcome"]));
    register!(VIOLATIONS, IntCounter::new("stashwarn_violations_total", "Confirmed stash violations"));
    register!(NOTIFICATIONS, IntCounterVec::new(Opts::new("stashwarn_notifications_total", "Webhook notifications by delivery result"), &["result"]));
    register!(DECOYS_PLACED, IntCounter::new("stashwarn_decoys_placed_total", "Stashes converted into decoys"));
    register!(COMMANDS, IntCounterVec::new(Opts::new("stashwarn_commands_total", "Stash command invocations by action"), &["action"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

#[inline]
pub fn record_uncover(outcome: &str) {
    if let Some(c) = UNCOVER_EVENTS.get() {
        c.with_label_values(&[outcome]).inc();
    }
}

#[inline]
pub fn record_violation() {
    if let Some(c) = VIOLATIONS.get() {
        c.inc();
    }
}

#[inline]
pub fn record_notification(result: &str) {
    if let Some(c) = NOTIFICATIONS.get() {
        c.with_label_values(&[result]).inc();
    }
}

#[inline]
pub fn record_decoy() {
    if let Some(c) = DECOYS_PLACED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_command(action: &str) {
    if let Some(c) = COMMANDS.get() {
        c.with_label_values(&[action]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_lifecycle() {
        // Safe to call more than once; later registrations only warn.
        init();

        record_uncover("violation");
        record_violation();
        record_notification("sent");

        let output = gather_metrics();
        assert!(output.contains("stashwarn_uncover_events_total"));
        assert!(output.contains("stashwarn_violations_total"));
        assert!(output.contains("stashwarn_notifications_total"));
    }
}
