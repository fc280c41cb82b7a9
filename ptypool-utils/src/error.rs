//! Error types for ptypool
//!
//! Provides a unified error type used across all ptypool crates.

use std::path::PathBuf;

/// Main error type for ptypool operations
#[derive(Debug, thiserror::Error)]
pub enum PtyPoolError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Allocation Errors ===

    #[error("Allocation failed: {0}")]
    AllocationFailed(String),

    #[error("Master already paired: {0}")]
    AlreadyOpen(String),

    #[error("Device name already registered: {0}")]
    NameTaken(String),

    // === Access Errors ===

    #[error("Access denied: {0}")]
    AccessDenied(String),

    // === Lookup Errors ===

    #[error("Not found: {0}")]
    NotFound(String),

    // === Dispatch Errors ===

    #[error("Unsupported control code {0:#x}")]
    UnsupportedControl(u32),

    // === Channel Errors ===

    #[error("Channel error: {0}")]
    Channel(String),

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PtyPoolError {
    /// Create an allocation error
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::AllocationFailed(msg.into())
    }

    /// Create an access-denied error
    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a channel error
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using PtyPoolError
pub type Result<T> = std::result::Result<T, PtyPoolError>;
