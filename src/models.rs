use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the pseudo-device that addresses every registered light.
pub const ALL_DEVICES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub identifier: String,
}

impl Device {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    pub name: String,
    pub rgb: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerState::On => f.write_str("on"),
            PowerState::Off => f.write_str("off"),
        }
    }
}

/// Serialized as the vendor's `cmd` object: `{"name": "turn", "value": "on"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "snake_case")]
pub enum Command {
    Turn(PowerState),
    Color(Rgb),
    Scene(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Turn(_) => "turn",
            Command::Color(_) => "color",
            Command::Scene(_) => "scene",
        }
    }
}

/// Body of a PUT to the vendor control endpoint.
#[derive(Debug, Serialize)]
pub struct ControlRequest<'a> {
    pub device: &'a str,
    pub model: &'a str,
    pub cmd: &'a Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSelector {
    Device(Device),
    All,
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceSelector::Device(device) => f.write_str(&device.name),
            DeviceSelector::All => f.write_str(ALL_DEVICES),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VendorDevice {
    pub device: String,
    pub model: String,
    #[serde(rename = "deviceName")]
    pub device_name: String,
    #[serde(default)]
    pub controllable: bool,
    #[serde(default, rename = "supportCmds")]
    pub support_cmds: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeviceListResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: DeviceListData,
}

#[derive(Debug, Deserialize)]
pub struct DeviceListData {
    #[serde(default)]
    pub devices: Vec<VendorDevice>,
}
