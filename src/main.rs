// main.rs
use govee_lights_bot::{
    commands::CommandOrchestrator,
    config,
    devices::{DeviceRegistry, GoveeClient, Palette},
    interaction::{FrontEnd, discord},
    metrics, telemetry,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = config::Settings::new()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    telemetry::init(&settings.logging);

    if settings.metrics.enabled {
        metrics::setup_metrics(settings.metrics.port)
            .map_err(|e| anyhow::anyhow!("Failed to setup metrics: {}", e))?;
        tracing::info!("Metrics exported on port {}", settings.metrics.port);
    }

    let client = Arc::new(
        GoveeClient::new(&settings.govee)
            .map_err(|e| anyhow::anyhow!("Failed to build vendor client: {}", e))?,
    );
    tracing::info!(retry = ?client.retry_policy(), "Vendor client ready");

    let registry = DeviceRegistry::builtin(settings.govee.model.clone());
    let orchestrator = CommandOrchestrator::new(client.clone(), registry, Palette::default());
    let front = Arc::new(FrontEnd::new(orchestrator, client));

    discord::run(&settings.discord, front)
        .await
        .map_err(|e| anyhow::anyhow!("Chat client error: {}", e))?;

    Ok(())
}
