// error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown device: {0}")]
    UnknownDevice(String),
    #[error("Unknown color: {0}")]
    UnknownColor(String),
    #[error("Unknown menu action: {0}")]
    UnknownMenuAction(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Vendor rejected request with status {status}: {body}")]
    VendorRejected { status: u16, body: String },
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] validator::ValidationErrors),
    #[error("Chat error: {0}")]
    Chat(String),
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Rejections the vendor will repeat no matter how often we retry.
    pub fn is_definitive(&self) -> bool {
        matches!(self, AppError::VendorRejected { status: 401 | 403, .. })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::Chat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_rejections_are_definitive() {
        for status in [401, 403] {
            let err = AppError::VendorRejected { status, body: String::new() };
            assert!(err.is_definitive());
        }
    }

    #[test]
    fn other_failures_are_retryable() {
        let server = AppError::VendorRejected { status: 500, body: "oops".into() };
        let throttled = AppError::VendorRejected { status: 429, body: String::new() };
        let transport = AppError::Transport("connection refused".into());
        assert!(!server.is_definitive());
        assert!(!throttled.is_definitive());
        assert!(!transport.is_definitive());
    }

    #[test]
    fn rejection_message_carries_status_and_body() {
        let err = AppError::VendorRejected { status: 500, body: "boom".into() };
        assert_eq!(err.to_string(), "Vendor rejected request with status 500: boom");
    }
}
