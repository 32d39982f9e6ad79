//! Error types for boundary measurement and conversion.

use thiserror::Error;

/// Errors raised by conversions, configuration and file access.
///
/// Import parsers do not use this type for bad file content; they return
/// `None` instead. Only precondition violations and environment failures
/// surface here.
#[derive(Debug, Error)]
pub enum ParcelError {
    /// A caller passed arguments outside the documented domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A GeoJSON structure was malformed or not a polygon.
    #[error("Format error: {0}")]
    Format(String),

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serializing a geometry or summary failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading a boundary file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ParcelError>;
