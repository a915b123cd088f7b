//! Prometheus metrics

use crate::decision::Decision;
use std::net::SocketAddr;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Comps fetch from the provider
    CompsFetch,
    /// Full identify -> decide pipeline
    Decision,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Comps lookups served
    CompsRequests,
    /// Decision log write failures
    LogWriteFailures,
}

/// Start the Prometheus HTTP listener on `port`
///
/// Must run inside a tokio runtime.
pub fn install_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;
    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::CompsFetch => "cardking_comps_fetch_latency_ms",
        LatencyMetric::Decision => "cardking_decision_latency_ms",
    };
    metrics::histogram!(metric_name).record(duration.as_secs_f64() * 1000.0);
}

/// Bump a counter by one
pub fn increment(metric: CounterMetric) {
    let metric_name = match metric {
        CounterMetric::CompsRequests => "cardking_comps_requests_total",
        CounterMetric::LogWriteFailures => "cardking_log_write_failures_total",
    };
    metrics::counter!(metric_name).increment(1);
}

/// Count one recommendation by outcome
pub fn record_decision(decision: Decision, confidence: u8) {
    metrics::counter!("cardking_decisions_total", "decision" => decision.as_str()).increment(1);
    metrics::histogram!("cardking_decision_confidence").record(f64::from(confidence));
}
