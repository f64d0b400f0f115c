//! API-specific error types
//!
//! Every failure of the client surfaces as an [`ApiError`]. Errors are never
//! retried internally; [`ApiError::category`] tells the caller which side is
//! at fault.

use std::time::Duration;

use fanella_domain::FanellaError;
use thiserror::Error;

/// Which side of the wire an error originated on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 5xx responses - the service failed
    Service,
    /// 4xx responses - the request was rejected
    Caller,
    /// Rejected locally before any request was sent
    Local,
    /// Connection, timeout, file read or body decode failures
    Transport,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Fixed message; the response body is never exposed.
    #[error("Error from our side, sorry, we will fix it")]
    Service { status: u16 },

    #[error("Error from your side, fix it or contact support at https://fanella.ai. Error: {message}")]
    Caller { status: u16, message: String },

    #[error(transparent)]
    Domain(#[from] FanellaError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Service { .. } => ApiErrorCategory::Service,
            Self::Caller { .. } => ApiErrorCategory::Caller,
            Self::Domain(_) | Self::Config(_) => ApiErrorCategory::Local,
            Self::Transport(_) | Self::Io(_) | Self::Timeout(_) | Self::Decode(_) => {
                ApiErrorCategory::Transport
            }
        }
    }

    /// HTTP status for errors that came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status } | Self::Caller { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Config(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
