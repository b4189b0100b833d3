//! Metrics collection.
//!
//! # Metrics
//! - `wallet_link_init_total` (counter): initializations by outcome
//! - `wallet_link_probe_failures_total` (counter): failed liveness attempts
//! - `wallet_link_endpoint_stalls_total` (counter): stall timeouts in fallback racing
//! - `wallet_link_connection_ready` (gauge): 1 while a connection is published
//!
//! No exporter is installed here; the embedding application chooses one.

/// Record the end of an initialization attempt.
pub fn record_initialization(outcome: &'static str) {
    metrics::counter!("wallet_link_init_total", "outcome" => outcome).increment(1);
}

/// Record one failed liveness probe attempt.
pub fn record_probe_failure() {
    metrics::counter!("wallet_link_probe_failures_total").increment(1);
}

/// Record a fallback endpoint exceeding its stall timeout.
pub fn record_endpoint_stall() {
    metrics::counter!("wallet_link_endpoint_stalls_total").increment(1);
}

/// Record whether a connection is currently published.
pub fn record_connection_ready(ready: bool) {
    metrics::gauge!("wallet_link_connection_ready").set(if ready { 1.0 } else { 0.0 });
}
