//! Error types shared by the library modules.
//!
//! Command glue wraps these in `anyhow` with context; callers that need to
//! react to a specific failure can `downcast_ref::<WallError>()`.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the wallpaper library itself (configuration, naming, selection).
#[derive(Debug, Error)]
pub enum WallError {
    /// No destination directory was given by flag, environment or config file.
    #[error("destination needs to be set (use --destination or WALLHAVEN_DESTINATION)")]
    Config,

    /// A path or value does not follow the `wallhaven-<id>-<purity>` layout.
    #[error("{subject}: {reason}")]
    Format { subject: String, reason: String },

    /// The weighted pool was empty.
    #[error("no images found")]
    NotFound,

    /// Only fresh wallpapers may be deleted.
    #[error("refusing to delete {}: saved wallpapers are kept", path.display())]
    Precondition { path: PathBuf },
}

impl WallError {
    pub fn format(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        WallError::Format {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

/// Failure of a single HTTP transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Worth retrying: connection trouble, timeouts, 5xx, 429.
    #[error("{0}")]
    Transient(String),

    /// Retrying will not help: any other 4xx, undecodable payload.
    #[error("{0}")]
    Permanent(String),

    /// Local filesystem failure while storing the payload.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransferError {
    pub fn is_transient(&self) -> bool {
        matches!(self, TransferError::Transient(_))
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            TransferError::Transient(format!("HTTP {status}"))
        } else {
            TransferError::Permanent(format!("HTTP {status}"))
        }
    }
}

impl From<reqwest::Error> for TransferError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return TransferError::from_status(status);
        }
        if err.is_decode() || err.is_builder() {
            TransferError::Permanent(err.to_string())
        } else {
            TransferError::Transient(err.to_string())
        }
    }
}
