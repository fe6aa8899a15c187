// registry.rs
use crate::{
    error::AppError,
    models::{ALL_DEVICES, Device, DeviceSelector},
};

#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
    model: String,
}

impl DeviceRegistry {
    pub fn new(devices: Vec<Device>, model: impl Into<String>) -> Self {
        Self {
            devices,
            model: model.into(),
        }
    }

    /// Resolves a device name, or the `All` pseudo-device, to a selector.
    pub fn resolve(&self, name: &str) -> Result<DeviceSelector, AppError> {
        if name == ALL_DEVICES {
            return Ok(DeviceSelector::All);
        }
        self.devices
            .iter()
            .find(|device| device.name == name)
            .cloned()
            .map(DeviceSelector::Device)
            .ok_or_else(|| AppError::UnknownDevice(name.to_string()))
    }

    /// Real devices only; `All` is never part of this list.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Names in menu order, followed by the `All` selector.
    pub fn selector_names(&self) -> Vec<&str> {
        self.devices
            .iter()
            .map(|device| device.name.as_str())
            .chain(std::iter::once(ALL_DEVICES))
            .collect()
    }

    /// The compiled-in lights, all of the given model.
    pub fn builtin(model: impl Into<String>) -> Self {
        Self::new(
            vec![
                Device::new("Desk Light", "0F:3F:D0:C9:07:30:0D:18"),
                Device::new("Lamp 1", "63:53:D0:C9:07:3B:30:B2"),
                Device::new("Lamp 2", "55:8D:D0:C9:07:39:1A:D0"),
            ],
            model,
        )
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::builtin("H6008")
    }
}
