// govee.rs
use crate::{
    config::GoveeSettings,
    error::AppError,
    metrics,
    models::{Command, ControlRequest, Device, DeviceListResponse, VendorDevice},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{error, info, warn};

const API_KEY_HEADER: &str = "Govee-API-Key";

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Pause between attempts. Never applied after the last one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

/// Client for the Govee developer API. One connection pool serves every
/// attempt and every device of a fan-out.
#[derive(Debug, Clone)]
pub struct GoveeClient {
    http: reqwest::Client,
    api_key: String,
    control_url: String,
    devices_url: String,
    retry: RetryPolicy,
}

impl GoveeClient {
    pub fn new(settings: &GoveeSettings) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            http,
            api_key: settings.api_key.clone(),
            control_url: settings.control_url.clone(),
            devices_url: settings.devices_url.clone(),
            retry: RetryPolicy {
                max_attempts: settings.max_attempts,
                delay: settings.retry_delay(),
            },
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    async fn attempt(&self, body: &ControlRequest<'_>) -> Result<(), AppError> {
        let response = self
            .http
            .put(&self.control_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::VendorRejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl super::LightControl for GoveeClient {
    async fn send(&self, device: &Device, model: &str, command: &Command) -> bool {
        let body = ControlRequest {
            device: &device.identifier,
            model,
            cmd: command,
        };

        for attempt in 1..=self.retry.max_attempts {
            match self.attempt(&body).await {
                Ok(()) => {
                    info!(
                        device = %device.identifier,
                        command = command.name(),
                        attempt,
                        "Command succeeded"
                    );
                    metrics::record_attempt(true);
                    return true;
                }
                Err(err @ AppError::VendorRejected { .. }) => {
                    warn!(
                        device = %device.identifier,
                        command = command.name(),
                        attempt,
                        "Failed to send command: {}",
                        err
                    );
                    metrics::record_attempt(false);
                    if err.is_definitive() {
                        break;
                    }
                }
                Err(err) => {
                    error!(
                        device = %device.identifier,
                        command = command.name(),
                        attempt,
                        "Client error while sending command: {}",
                        err
                    );
                    metrics::record_attempt(false);
                }
            }

            if attempt < self.retry.max_attempts {
                tokio::time::sleep(self.retry.delay).await;
            }
        }

        false
    }
}

/// Single attempt, no retry.
#[async_trait]
impl super::DeviceDirectory for GoveeClient {
    async fn list_devices(&self) -> Result<Vec<VendorDevice>, AppError> {
        let response = self
            .http
            .get(&self.devices_url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::VendorRejected {
                status: status.as_u16(),
                body,
            });
        }

        let listing: DeviceListResponse = response.json().await?;
        info!(count = listing.data.devices.len(), "Fetched device list");
        Ok(listing.data.devices)
    }
}
