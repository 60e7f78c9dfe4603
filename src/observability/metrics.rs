//! Metrics collection.
//!
//! # Metrics
//! - `headerset_headers_set_total` (counter): headers written to sinks
//! - `headerset_headers_removed_total` (counter): headers deleted from sinks
//! - `headerset_type_conflicts_total` (counter): rejected header creations
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! host installs a recorder.

pub fn record_apply(set: usize, removed: usize) {
    ::metrics::counter!("headerset_headers_set_total").increment(set as u64);
    ::metrics::counter!("headerset_headers_removed_total").increment(removed as u64);
}

pub fn record_type_conflict() {
    ::metrics::counter!("headerset_type_conflicts_total").increment(1);
}
