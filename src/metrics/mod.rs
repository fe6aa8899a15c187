// metrics/mod.rs
use crate::error::AppError;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

pub fn setup_metrics(port: u16) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| AppError::Internal(e.into()))
}

pub fn record_attempt(success: bool) {
    ::metrics::counter!("vendor_attempts_total", "outcome" => outcome(success)).increment(1);
}

pub fn record_command(command: &'static str, success: bool) {
    ::metrics::counter!(
        "vendor_commands_total",
        "command" => command,
        "outcome" => outcome(success)
    )
    .increment(1);
}

fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "failure" }
}
