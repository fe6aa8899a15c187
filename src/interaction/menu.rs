// menu.rs
//! Menu tree behind the `lights` command.
//!
//! Every button carries its whole transition in its custom id, so a click can
//! be handled without remembering anything about earlier clicks:
//!
//! ```text
//! DeviceSelect --device--> ActionSelect --on/off--> Terminal
//!                               |
//!                               +--colors--> ColorSelect --color--> Terminal
//! ```

use crate::{
    commands::CommandOrchestrator,
    devices::DeviceDirectory,
    error::AppError,
    models::{DeviceSelector, PowerState},
};
use std::sync::Arc;
use tracing::{info, warn};

const ID_PREFIX: &str = "lights";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    DeviceSelect,
    ActionSelect { selector: String },
    ColorSelect { selector: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    ChooseDevice { selector: String },
    TurnOn { selector: String },
    TurnOff { selector: String },
    OpenColors { selector: String },
    ChooseColor { selector: String, color: String },
}

impl MenuAction {
    pub fn custom_id(&self) -> String {
        match self {
            MenuAction::ChooseDevice { selector } => format!("{ID_PREFIX}:device:{selector}"),
            MenuAction::TurnOn { selector } => format!("{ID_PREFIX}:on:{selector}"),
            MenuAction::TurnOff { selector } => format!("{ID_PREFIX}:off:{selector}"),
            MenuAction::OpenColors { selector } => format!("{ID_PREFIX}:colors:{selector}"),
            MenuAction::ChooseColor { selector, color } => {
                format!("{ID_PREFIX}:color:{selector}:{color}")
            }
        }
    }

    pub fn parse(custom_id: &str) -> Result<Self, AppError> {
        let invalid = || AppError::UnknownMenuAction(custom_id.to_string());

        let rest = custom_id
            .strip_prefix(ID_PREFIX)
            .and_then(|rest| rest.strip_prefix(':'))
            .ok_or_else(invalid)?;
        let (kind, args) = rest.split_once(':').ok_or_else(invalid)?;
        if args.is_empty() {
            return Err(invalid());
        }

        let selector = args.to_string();
        let action = match kind {
            "device" => MenuAction::ChooseDevice { selector },
            "on" => MenuAction::TurnOn { selector },
            "off" => MenuAction::TurnOff { selector },
            "colors" => MenuAction::OpenColors { selector },
            "color" => {
                let (selector, color) = args.rsplit_once(':').ok_or_else(invalid)?;
                if selector.is_empty() || color.is_empty() {
                    return Err(invalid());
                }
                MenuAction::ChooseColor {
                    selector: selector.to_string(),
                    color: color.to_string(),
                }
            }
            _ => return Err(invalid()),
        };
        Ok(action)
    }

    /// Terminal actions reach the vendor API and end the interaction.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MenuAction::TurnOn { .. } | MenuAction::TurnOff { .. } | MenuAction::ChooseColor { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub tone: Tone,
    pub action: MenuAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub prompt: String,
    pub options: Vec<MenuOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Next menu, shown only to the user who clicked.
    Menu(Menu),
    /// Result of a command, shown to the channel.
    Outcome(String),
    /// Input that could not be acted upon, shown only to the user.
    Rejected(String),
}

impl Reply {
    pub fn is_private(&self) -> bool {
        !matches!(self, Reply::Outcome(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Reply::Menu(menu) => &menu.prompt,
            Reply::Outcome(text) | Reply::Rejected(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCommand {
    Lights,
    Scene(String),
    Devices,
}

impl TextCommand {
    pub fn parse(prefix: &str, content: &str) -> Option<Self> {
        let body = content.trim().strip_prefix(prefix)?;
        let (name, args) = match body.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (body, ""),
        };
        match name {
            "lights" => Some(TextCommand::Lights),
            "devices" => Some(TextCommand::Devices),
            "scene" if !args.is_empty() => Some(TextCommand::Scene(args.to_string())),
            _ => None,
        }
    }
}

/// How a click is acknowledged before its reply is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgement {
    /// Answer directly with the reply from `FrontEnd::click`.
    Immediate,
    /// Defer publicly, run the action, then fill in the outcome.
    DeferPublic(MenuAction),
}

pub struct FrontEnd {
    orchestrator: CommandOrchestrator,
    directory: Arc<dyn DeviceDirectory>,
}

impl FrontEnd {
    pub fn new(orchestrator: CommandOrchestrator, directory: Arc<dyn DeviceDirectory>) -> Self {
        Self {
            orchestrator,
            directory,
        }
    }

    pub fn menu(&self, state: &MenuState) -> Menu {
        match state {
            MenuState::DeviceSelect => Menu {
                prompt: "Select a device to control:".to_string(),
                options: self
                    .orchestrator
                    .registry()
                    .selector_names()
                    .into_iter()
                    .map(|name| MenuOption {
                        label: name.to_string(),
                        tone: if name == crate::models::ALL_DEVICES {
                            Tone::Danger
                        } else {
                            Tone::Primary
                        },
                        action: MenuAction::ChooseDevice {
                            selector: name.to_string(),
                        },
                    })
                    .collect(),
            },
            MenuState::ActionSelect { selector } => Menu {
                prompt: format!("Select an action for {}:", subject(selector)),
                options: vec![
                    MenuOption {
                        label: "Turn On".to_string(),
                        tone: Tone::Success,
                        action: MenuAction::TurnOn {
                            selector: selector.clone(),
                        },
                    },
                    MenuOption {
                        label: "Turn Off".to_string(),
                        tone: Tone::Danger,
                        action: MenuAction::TurnOff {
                            selector: selector.clone(),
                        },
                    },
                    MenuOption {
                        label: "Colors".to_string(),
                        tone: Tone::Primary,
                        action: MenuAction::OpenColors {
                            selector: selector.clone(),
                        },
                    },
                ],
            },
            MenuState::ColorSelect { selector } => Menu {
                prompt: format!("Select a color for {}:", subject(selector)),
                options: self
                    .orchestrator
                    .palette()
                    .colors()
                    .iter()
                    .map(|color| MenuOption {
                        label: capitalize(&color.name),
                        tone: Tone::Secondary,
                        action: MenuAction::ChooseColor {
                            selector: selector.clone(),
                            color: color.name.clone(),
                        },
                    })
                    .collect(),
            },
        }
    }

    /// Applies one click. Input errors become a private rejection.
    pub async fn select(&self, action: MenuAction) -> Reply {
        info!(custom_id = %action.custom_id(), "Menu selection");
        match self.try_select(action).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Rejected menu selection: {}", err);
                rejection(&err)
            }
        }
    }

    /// Checks that a click names a known device and, for colors, a known
    /// palette entry. Sends nothing.
    pub fn validate(&self, action: &MenuAction) -> Result<(), AppError> {
        match action {
            MenuAction::ChooseDevice { selector }
            | MenuAction::TurnOn { selector }
            | MenuAction::TurnOff { selector }
            | MenuAction::OpenColors { selector } => {
                self.orchestrator.registry().resolve(selector)?;
            }
            MenuAction::ChooseColor { selector, color } => {
                self.orchestrator.registry().resolve(selector)?;
                self.orchestrator.palette().color_of(color)?;
            }
        }
        Ok(())
    }

    /// Only valid terminal clicks are deferred; everything else, rejections
    /// included, is answered immediately so private replies stay private.
    pub fn acknowledgement(&self, custom_id: &str) -> Acknowledgement {
        match MenuAction::parse(custom_id) {
            Ok(action) if action.is_terminal() && self.validate(&action).is_ok() => {
                Acknowledgement::DeferPublic(action)
            }
            _ => Acknowledgement::Immediate,
        }
    }

    /// Parses and applies a raw button id.
    pub async fn click(&self, custom_id: &str) -> Reply {
        match MenuAction::parse(custom_id) {
            Ok(action) => self.select(action).await,
            Err(err) => {
                warn!("Rejected menu selection: {}", err);
                rejection(&err)
            }
        }
    }

    async fn try_select(&self, action: MenuAction) -> Result<Reply, AppError> {
        let registry = self.orchestrator.registry();
        match action {
            MenuAction::ChooseDevice { selector } => {
                registry.resolve(&selector)?;
                Ok(Reply::Menu(self.menu(&MenuState::ActionSelect { selector })))
            }
            MenuAction::OpenColors { selector } => {
                registry.resolve(&selector)?;
                Ok(Reply::Menu(self.menu(&MenuState::ColorSelect { selector })))
            }
            MenuAction::TurnOn { selector } => {
                let target = registry.resolve(&selector)?;
                let success = self.orchestrator.set_power(&target, PowerState::On).await;
                Ok(Reply::Outcome(power_message(&target, PowerState::On, success)))
            }
            MenuAction::TurnOff { selector } => {
                let target = registry.resolve(&selector)?;
                let success = self.orchestrator.set_power(&target, PowerState::Off).await;
                Ok(Reply::Outcome(power_message(&target, PowerState::Off, success)))
            }
            MenuAction::ChooseColor { selector, color } => {
                let target = registry.resolve(&selector)?;
                let success = self.orchestrator.set_color(&target, &color).await?;
                Ok(Reply::Outcome(color_message(&target, &color, success)))
            }
        }
    }

    pub async fn run_text(&self, command: TextCommand) -> Reply {
        match command {
            TextCommand::Lights => Reply::Menu(self.menu(&MenuState::DeviceSelect)),
            TextCommand::Scene(scene) => {
                let success = self.orchestrator.set_scene(&DeviceSelector::All, &scene).await;
                Reply::Outcome(if success {
                    format!("All lights set to scene {scene}!")
                } else {
                    format!("Failed to set scene {scene} on all lights.")
                })
            }
            TextCommand::Devices => match self.directory.list_devices().await {
                Ok(devices) if devices.is_empty() => {
                    Reply::Outcome("No devices are registered with the vendor.".to_string())
                }
                Ok(devices) => {
                    let lines: Vec<String> = devices
                        .iter()
                        .map(|d| format!("{} ({}, {})", d.device_name, d.model, d.device))
                        .collect();
                    Reply::Outcome(format!("Devices:\n{}", lines.join("\n")))
                }
                Err(err) => {
                    warn!("Failed to list devices: {}", err);
                    Reply::Outcome("Failed to retrieve devices.".to_string())
                }
            },
        }
    }
}

fn subject(selector: &str) -> String {
    if selector == crate::models::ALL_DEVICES {
        "all devices".to_string()
    } else {
        selector.to_string()
    }
}

fn power_message(target: &DeviceSelector, state: PowerState, success: bool) -> String {
    match (target, success) {
        (DeviceSelector::All, true) => format!("All lights turned {state}!"),
        (DeviceSelector::All, false) => format!("Failed to turn {state} all lights."),
        (DeviceSelector::Device(device), true) => format!("{} turned {state}!", device.name),
        (DeviceSelector::Device(device), false) => {
            format!("Failed to turn {state} {}.", device.name)
        }
    }
}

fn color_message(target: &DeviceSelector, color: &str, success: bool) -> String {
    match (target, success) {
        (DeviceSelector::All, true) => format!("All lights changed to {color}!"),
        (DeviceSelector::All, false) => format!("Failed to change all lights to {color}."),
        (DeviceSelector::Device(device), true) => format!("{} changed to {color}!", device.name),
        (DeviceSelector::Device(device), false) => {
            format!("Failed to change {} to {color}.", device.name)
        }
    }
}

fn rejection(err: &AppError) -> Reply {
    Reply::Rejected(match err {
        AppError::UnknownDevice(name) => format!("Unknown device {name}."),
        AppError::UnknownColor(name) => format!("Unknown color {name}."),
        _ => "That control is no longer valid.".to_string(),
    })
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
