// config/mod.rs
use crate::error::AppError;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;
use validator::Validate;

pub const DISCORD_TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
pub const GOVEE_API_KEY_VAR: &str = "GOVEE_API_KEY";

#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub discord: DiscordSettings,
    #[validate(nested)]
    pub govee: GoveeSettings,
    pub logging: LoggingSettings,
    pub metrics: MetricsSettings,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DiscordSettings {
    #[serde(default)]
    #[validate(length(min = 1, message = "DISCORD_BOT_TOKEN must be set"))]
    pub token: String,
    #[validate(length(min = 1))]
    pub command_prefix: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GoveeSettings {
    #[serde(default)]
    #[validate(length(min = 1, message = "GOVEE_API_KEY must be set"))]
    pub api_key: String,
    #[validate(url)]
    pub control_url: String,
    #[validate(url)]
    pub devices_url: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
    #[validate(range(min = 1))]
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl GoveeSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub port: u16,
}

impl Settings {
    /// Loads `.env`, `config/config.*`, `APP__*` variables and the two secrets.
    pub fn new() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::with_secrets(
            std::env::var(DISCORD_TOKEN_VAR).ok(),
            std::env::var(GOVEE_API_KEY_VAR).ok(),
        )
    }

    pub fn with_secrets(
        discord_token: Option<String>,
        govee_api_key: Option<String>,
    ) -> Result<Self, AppError> {
        Self::build(discord_token, govee_api_key, true)
    }

    /// Without `external_sources` only the compiled defaults and the secrets apply.
    fn build(
        discord_token: Option<String>,
        govee_api_key: Option<String>,
        external_sources: bool,
    ) -> Result<Self, AppError> {
        let mut builder = Config::builder()
            .set_default("discord.command_prefix", "!")?
            .set_default(
                "govee.control_url",
                "https://developer-api.govee.com/v1/devices/control",
            )?
            .set_default("govee.devices_url", "https://developer-api.govee.com/v1/devices")?
            .set_default("govee.model", "H6008")?
            .set_default("govee.request_timeout_secs", 10)?
            .set_default("govee.max_attempts", 3)?
            .set_default("govee.retry_delay_ms", 1000)?
            .set_default("logging.level", "info")?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.port", 9000)?;

        if external_sources {
            builder = builder
                .add_source(File::with_name("config/config").required(false))
                .add_source(environment());
        }

        let settings: Settings = builder
            .set_override_option("discord.token", discord_token)?
            .set_override_option("govee.api_key", govee_api_key)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }
}

/// `APP__GOVEE__MODEL=H6199` sets `govee.model`.
fn environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
