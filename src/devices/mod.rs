// devices/mod.rs
mod govee;
mod palette;
mod registry;

pub use govee::{GoveeClient, RetryPolicy};
pub use palette::Palette;
pub use registry::DeviceRegistry;

use crate::{
    error::AppError,
    models::{Command, Device, VendorDevice},
};

/// Sends one command to one light. Implementations own their retry policy
/// and collapse every failure into `false`.
#[async_trait::async_trait]
pub trait LightControl: Send + Sync {
    async fn send(&self, device: &Device, model: &str, command: &Command) -> bool;
}

/// Lists the devices the vendor account knows about.
#[async_trait::async_trait]
pub trait DeviceDirectory: Send + Sync {
    async fn list_devices(&self) -> Result<Vec<VendorDevice>, AppError>;
}
