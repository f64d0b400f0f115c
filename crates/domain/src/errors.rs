//! Error types used throughout the domain layer

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised locally, before or after a network round-trip.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum FanellaError {
    /// Creation input rejected before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No content type is registered for the file name's extension
    #[error("Unknown mime type for file: {0}")]
    UnknownMimeType(String),

    /// A server record could not be decoded into the resource type
    #[error("Hydration error: {0}")]
    Hydration(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, FanellaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_tagged() {
        let err = FanellaError::InvalidInput("no source input".to_string());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["type"], "InvalidInput");
        assert_eq!(json["message"], "no source input");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = FanellaError::UnknownMimeType("notes.zzz".to_string());
        assert_eq!(err.to_string(), "Unknown mime type for file: notes.zzz");
    }
}
