//! Metrics for detection throughput and data quality.
//!
//! Counters and histograms are emitted through the `metrics` facade; wiring
//! an exporter (Prometheus or otherwise) is the embedding application's
//! concern.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Detection pass latency metric name.
pub const METRIC_DETECTION_LATENCY: &str = "detection_latency_ms";
/// Events rejected counter metric name.
pub const METRIC_EVENTS_REJECTED: &str = "events_rejected_total";
/// Quotes skipped counter metric name.
pub const METRIC_QUOTES_SKIPPED: &str = "quotes_skipped_total";
/// Markets scanned counter metric name.
pub const METRIC_MARKETS_SCANNED: &str = "markets_scanned_total";
/// Opportunities detected counter metric name.
pub const METRIC_OPPORTUNITIES_DETECTED: &str = "opportunities_detected_total";
/// Opportunities suppressed by dedup counter metric name.
pub const METRIC_OPPORTUNITIES_SUPPRESSED: &str = "opportunities_suppressed_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_DETECTION_LATENCY,
        "Time to scan one snapshot batch in milliseconds"
    );

    describe_counter!(
        METRIC_EVENTS_REJECTED,
        "Total number of events rejected for missing identity fields"
    );
    describe_counter!(
        METRIC_QUOTES_SKIPPED,
        "Total number of malformed or invalid quotes skipped"
    );
    describe_counter!(
        METRIC_MARKETS_SCANNED,
        "Total number of event/market combinations scanned"
    );
    describe_counter!(
        METRIC_OPPORTUNITIES_DETECTED,
        "Total number of arbitrage opportunities detected"
    );
    describe_counter!(
        METRIC_OPPORTUNITIES_SUPPRESSED,
        "Total number of repeat opportunities suppressed by deduplication"
    );

    debug!("Metrics initialized");
}

/// Increment events rejected counter.
pub fn inc_events_rejected() {
    counter!(METRIC_EVENTS_REJECTED).increment(1);
}

/// Increment quotes skipped counter.
pub fn inc_quotes_skipped() {
    counter!(METRIC_QUOTES_SKIPPED).increment(1);
}

/// Increment markets scanned counter.
pub fn inc_markets_scanned() {
    counter!(METRIC_MARKETS_SCANNED).increment(1);
}

/// Increment opportunities detected counter.
pub fn inc_opportunities_detected() {
    counter!(METRIC_OPPORTUNITIES_DETECTED).increment(1);
}

/// Increment opportunities suppressed counter.
pub fn inc_opportunities_suppressed() {
    counter!(METRIC_OPPORTUNITIES_SUPPRESSED).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}

/// Create a latency timer for a detection pass.
pub fn timer_detection() -> LatencyTimer {
    LatencyTimer::new(METRIC_DETECTION_LATENCY)
}
