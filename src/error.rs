/*
    ABSTRACT: Error types for the threat event client
*/
use std::str::Utf8Error;

/// Result type for threat event operations.
pub type Result<T> = std::result::Result<T, ThreatEventError>;

/// A received payload could not be turned into a threat event structure.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload bytes are not UTF-8 text.
    #[error("payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    /// The payload text is not JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// An aggregate `otherData` entry did not hold a comma-joined string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("aggregate field '{key}' must be a string, found {found}")]
pub struct TypeValidationError {
    pub key: String,
    pub found: &'static str,
}

/// Errors that can occur while receiving or normalizing threat events.
#[derive(Debug, thiserror::Error)]
pub enum ThreatEventError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("type validation error: {0}")]
    TypeValidation(#[from] TypeValidationError),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ThreatEventError {
    /// Returns true if the payload itself was malformed.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, ThreatEventError::Decode(_))
    }

    /// Returns true if an aggregate field held a non-string value.
    pub fn is_type_validation_error(&self) -> bool {
        matches!(self, ThreatEventError::TypeValidation(_))
    }
}
