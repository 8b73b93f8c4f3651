use std::sync::OnceLock;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

// creates the custom registry and registers the custom metrics
pub fn setup() {
    let registry = registry();

    if let Err(error) = registry.register(Box::new(incoming_requests_counter().clone())) {
        tracing::warn!("Failed registering request counter: {error}");
    }

    if let Err(error) = registry.register(Box::new(response_time_hist().clone())) {
        tracing::warn!("Failed registering response time histogram: {error}");
    }
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();

    REGISTRY.get_or_init(Registry::new)
}

fn incoming_requests_counter() -> &'static IntCounterVec {
    static INCOMING_REQUESTS: OnceLock<IntCounterVec> = OnceLock::new();

    INCOMING_REQUESTS.get_or_init(|| {
        IntCounterVec::new(
            Opts::new("incoming_requests", "Incoming Requests"),
            &["endpoint", "status"],
        )
        .expect("failed to create metric")
    })
}

fn response_time_hist() -> &'static HistogramVec {
    static RESPONSE_TIME_COLLECTOR: OnceLock<HistogramVec> = OnceLock::new();

    RESPONSE_TIME_COLLECTOR.get_or_init(|| {
        HistogramVec::new(
            HistogramOpts::new("response_time", "Response Times"),
            &["endpoint"],
        )
        .expect("failed to create metric")
    })
}

pub(crate) fn track_response(endpoint: &str, status: u16, response_time: f64) {
    let status = status.to_string();
    incoming_requests_counter()
        .with_label_values(&[endpoint, status.as_str()])
        .inc();

    response_time_hist()
        .with_label_values(&[endpoint])
        .observe(response_time);
}

pub(crate) fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = prometheus::TextEncoder::new();
    let mut metrics = String::new();

    encoder.encode_utf8(&registry().gather(), &mut metrics)?;
    encoder.encode_utf8(&prometheus::gather(), &mut metrics)?;

    Ok(metrics)
}
