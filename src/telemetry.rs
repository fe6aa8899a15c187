// telemetry.rs
use crate::config::LoggingSettings;
use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

/// Installs the process-wide subscriber. `RUST_LOG` wins over the configured level.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_target(false)
        .init();
}
