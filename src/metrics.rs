use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Order creation outcomes (success / failure by kind)
// - Request latency per endpoint
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the service
pub struct Metrics {
    registry: Registry,

    pub orders_created: IntCounter,
    pub orders_failed: IntCounterVec,
    pub request_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounter::new(
            "orders_created_total",
            "Total orders created successfully",
        )?;
        registry.register(Box::new(orders_created.clone()))?;

        let orders_failed = IntCounterVec::new(
            Opts::new("orders_failed_total", "Total failed order operations"),
            &["kind"],
        )?;
        registry.register(Box::new(orders_failed.clone()))?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new("request_duration_seconds", "Request handling duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["endpoint"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            orders_failed,
            request_duration,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record an order creation outcome
    pub fn record_order_outcome(&self, failure_kind: Option<&str>) {
        match failure_kind {
            None => self.orders_created.inc(),
            Some(kind) => self.orders_failed.with_label_values(&[kind]).inc(),
        }
    }

    /// Helper to record request handling duration
    pub fn observe_request(&self, endpoint: &str, duration_secs: f64) {
        self.request_duration
            .with_label_values(&[endpoint])
            .observe(duration_secs);
    }
}
