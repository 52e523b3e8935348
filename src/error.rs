//! Error types for tpmwire
//!
//! Provides a unified error type for codec, header and transport operations.

use thiserror::Error;

use crate::header::TPM_LIB_ERROR;

/// Result type alias using TpmError
pub type Result<T> = std::result::Result<T, TpmError>;

/// Unified error type for tpmwire operations
#[derive(Debug, Error)]
pub enum TpmError {
    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Format error: {0}")]
    Format(String),

    #[error("Buffer overflow: write of {width} bytes at offset {offset} exceeds capacity {capacity}")]
    BufferOverflow {
        offset: usize,
        width: usize,
        capacity: usize,
    },

    #[error("Buffer overrun: read of {width} bytes at offset {offset} exceeds size {size}")]
    BufferOverrun {
        offset: usize,
        width: usize,
        size: usize,
    },

    // -------------------------------------------------------------------------
    // Header Errors
    // -------------------------------------------------------------------------
    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // -------------------------------------------------------------------------
    // Locality Errors
    // -------------------------------------------------------------------------
    #[error("Locality {locality} unavailable: {reason}")]
    LocalityUnavailable { locality: u8, reason: String },

    #[error("Failed to release locality {locality}: {reason}")]
    LockReleaseFailed { locality: u8, reason: String },

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TpmError {
    /// The numeric value reported in place of a TPM return code.
    ///
    /// No error carries a real return code, so this is always the
    /// library sentinel.
    pub fn return_code(&self) -> u32 {
        TPM_LIB_ERROR
    }
}
