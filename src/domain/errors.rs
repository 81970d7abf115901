//! Domain error types
//!
//! This module defines the error hierarchy for medroi. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main medroi error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum MedRoiError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A submission field is missing or out of range
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// Arithmetic failure inside the projection (e.g. decimal overflow)
    #[error("Computation error: {0}")]
    Computation(String),

    /// PDF rendering errors
    #[error("Report error: {0}")]
    Report(String),

    /// Google Drive-related errors
    #[error("Google Drive error: {0}")]
    Drive(#[from] DriveError),

    /// Google Sheets-related errors
    #[error("Google Sheets error: {0}")]
    Sheets(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl MedRoiError {
    /// Creates a validation error for the named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MedRoiError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors raised by an external collaborator
    /// (Drive, Sheets, PDF rendering) rather than by the submission itself
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            MedRoiError::Drive(_) | MedRoiError::Sheets(_) | MedRoiError::Report(_)
        )
    }
}

/// Google Drive-specific errors
///
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum DriveError {
    /// Failed to connect to the Drive API
    #[error("Failed to connect to Google Drive: {0}")]
    ConnectionFailed(String),

    /// Access token rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Configured root folder does not exist or is not shared
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// Upload request failed
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// Drive-side checksum differs from the local one
    #[error("Checksum mismatch: local {local}, remote {remote}")]
    ChecksumMismatch { local: String, remote: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body could not be understood
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl DriveError {
    /// Whether retrying the request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            DriveError::ConnectionFailed(_) | DriveError::Timeout(_) => true,
            DriveError::ServerError { .. } => true,
            DriveError::ClientError { status, .. } => *status == 429,
            _ => false,
        }
    }
}

impl From<std::io::Error> for MedRoiError {
    fn from(err: std::io::Error) -> Self {
        MedRoiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MedRoiError {
    fn from(err: serde_json::Error) -> Self {
        MedRoiError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for MedRoiError {
    fn from(err: toml::de::Error) -> Self {
        MedRoiError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<printpdf::Error> for MedRoiError {
    fn from(err: printpdf::Error) -> Self {
        MedRoiError::Report(err.to_string())
    }
}
