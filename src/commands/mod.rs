// commands/mod.rs
use crate::{
    devices::{DeviceRegistry, LightControl, Palette},
    error::AppError,
    metrics,
    models::{Command, Device, DeviceSelector, PowerState},
};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOutcome {
    pub device: String,
    pub success: bool,
}

/// Per-device results of one user action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutReport {
    pub outcomes: Vec<DeviceOutcome>,
}

impl FanOutReport {
    /// True iff every device succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.success)
    }

    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.success)
            .map(|outcome| outcome.device.as_str())
            .collect()
    }
}

pub struct CommandOrchestrator {
    control: Arc<dyn LightControl>,
    registry: DeviceRegistry,
    palette: Palette,
}

impl CommandOrchestrator {
    pub fn new(control: Arc<dyn LightControl>, registry: DeviceRegistry, palette: Palette) -> Self {
        Self {
            control,
            registry,
            palette,
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub async fn set_power(&self, selector: &DeviceSelector, state: PowerState) -> bool {
        self.dispatch(selector, Command::Turn(state))
            .await
            .all_succeeded()
    }

    /// Fails with `UnknownColor` before any request is sent.
    pub async fn set_color(
        &self,
        selector: &DeviceSelector,
        color_name: &str,
    ) -> Result<bool, AppError> {
        let color = self.palette.color_of(color_name)?;
        Ok(self
            .dispatch(selector, Command::Color(color.rgb))
            .await
            .all_succeeded())
    }

    pub async fn set_scene(&self, selector: &DeviceSelector, scene: &str) -> bool {
        self.dispatch(selector, Command::Scene(scene.to_string()))
            .await
            .all_succeeded()
    }

    /// Sends `command` to the selected device, or concurrently to every
    /// registered device for `All`. Waits for all of them; a failure never
    /// cancels the others.
    pub async fn dispatch(&self, selector: &DeviceSelector, command: Command) -> FanOutReport {
        let span = info_span!(
            "dispatch",
            action_id = %Uuid::new_v4(),
            target = %selector,
            command = command.name()
        );

        async {
            let targets: Vec<&Device> = match selector {
                DeviceSelector::Device(device) => vec![device],
                DeviceSelector::All => self.registry.devices().iter().collect(),
            };

            let model = self.registry.model();
            let results = join_all(
                targets
                    .iter()
                    .map(|device| self.control.send(device, model, &command)),
            )
            .await;

            let report = FanOutReport {
                outcomes: targets
                    .iter()
                    .zip(results)
                    .map(|(device, success)| {
                        metrics::record_command(command.name(), success);
                        DeviceOutcome {
                            device: device.name.clone(),
                            success,
                        }
                    })
                    .collect(),
            };

            if report.all_succeeded() {
                info!(devices = report.outcomes.len(), "Command applied");
            } else {
                warn!(failed = ?report.failed(), "Command failed for some devices");
            }
            report
        }
        .instrument(span)
        .await
    }
}
