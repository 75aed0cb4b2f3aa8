//! Error types and handling for the SecureWiper engine

use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Custom result type for SecureWiper operations
pub type Result<T> = StdResult<T, Error>;

/// Core error type for SecureWiper operations
#[derive(Error, Debug)]
#[non_exhaustive]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Invalid pass count: {0} (expected one of 1, 3, 7, 35)")]
    InvalidPassCount(u32),

    #[error("Hash error: {0}")]
    HashError(#[from] HashError),

    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Start is disabled: {0}")]
    StartDisabled(String),

    #[error("A sanitization run is already in progress")]
    RunInProgress,

    #[error("Export is unavailable: {0}")]
    ExportUnavailable(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

// -------------------- Sub-Error Categories --------------------

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Config parsing error: {0}")]
    Parse(String),

    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HashError {
    #[error("Hash algorithm unsupported: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Hash computation failed: {0}")]
    ComputationError(String),
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportError {
    #[error("Rasterization failed: {0}")]
    Rasterization(String),

    #[error("Document assembly failed: {0}")]
    Assembly(String),

    #[error("Print failed: {0}")]
    Print(String),
}

impl From<lopdf::Error> for ExportError {
    fn from(err: lopdf::Error) -> Self {
        ExportError::Assembly(err.to_string())
    }
}
