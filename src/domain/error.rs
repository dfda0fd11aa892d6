use crate::domain::models::MessageSeverity;
use thiserror::Error;

/// Everything that can end a sync attempt early
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Device '{name}' not found. Please ensure it is advertising.")]
    NotFound { name: String },

    #[error("No device address provided. Scan failed or device not found.")]
    MissingAddress,

    #[error("Failed to connect to {address}: {reason}")]
    ConnectFailed { address: String, reason: String },

    #[error("Error: {0}")]
    WriteFailed(String),

    #[error("Bluetooth unavailable: {0}")]
    RadioUnavailable(String),
}

impl SyncError {
    pub fn severity(&self) -> MessageSeverity {
        match self {
            Self::NotFound { .. } => MessageSeverity::Warning,
            _ => MessageSeverity::Error,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
