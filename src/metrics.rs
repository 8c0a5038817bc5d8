//! Prometheus metrics for the dashboard API and screening runs.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub screen_evaluations_total: IntCounter,
    pub screen_triggers_total: IntCounter,
    pub screen_failures_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let screen_evaluations_total = IntCounter::new(
            "screen_evaluations_total",
            "Symbols evaluated by the trigger engine",
        )?;
        let screen_triggers_total =
            IntCounter::new("screen_triggers_total", "Symbols whose pattern triggered")?;
        let screen_failures_total = IntCounter::new(
            "screen_failures_total",
            "Symbols skipped because data retrieval or validation failed",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(screen_evaluations_total.clone()))?;
        registry.register(Box::new(screen_triggers_total.clone()))?;
        registry.register(Box::new(screen_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            screen_evaluations_total,
            screen_triggers_total,
            screen_failures_total,
        })
    }

    /// Render all metrics in the text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
