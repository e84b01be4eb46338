//! Error types for wirecheck.
//!
//! This module defines the error taxonomy shared by both sides of the
//! transfer: transport failures, resource limits, and the data-integrity
//! violations the read client checks for.

use thiserror::Error;

/// Main error type for wirecheck operations.
#[derive(Debug, Error)]
pub enum TransferError {
    // Transport errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// An error status returned by the remote peer.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i32, message: String },

    // Resource limits
    #[error("Requested size {requested} exceeds the transfer limit of {max} bytes")]
    SizeLimit { requested: u64, max: u64 },

    // Data integrity (client-side, read path)
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    // Request shape errors
    #[error("Method not found: {method}")]
    MethodNotFound { method: String },

    #[error("Invalid params: {message}")]
    InvalidParams { message: String },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// A data-integrity violation detected while validating a reply.
///
/// Carries enough detail (field values, byte index) to diagnose the
/// mismatch; validation stops at the first violation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("Reply size {actual} does not match requested size {expected}")]
    SizeMismatch { expected: u32, actual: u32 },

    #[error("Payload length {actual} does not match declared size {declared}")]
    LengthMismatch { declared: u32, actual: usize },

    #[error("Byte at index {index} is {actual}, expected sentinel {expected}")]
    ByteMismatch {
        index: usize,
        expected: u8,
        actual: u8,
    },
}

/// Result type alias for wirecheck operations.
pub type Result<T> = std::result::Result<T, TransferError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for TransferError {
    fn from(err: serde_json::Error) -> Self {
        TransferError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for TransferError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransferError::Timeout(crate::config::NetworkConfig::REQUEST_TIMEOUT)
        } else {
            TransferError::Network {
                message: err.to_string(),
                cause: std::error::Error::source(&err).map(|s| s.to_string()),
            }
        }
    }
}

impl TransferError {
    /// Convert to a JSON-RPC error code.
    ///
    /// Standard JSON-RPC error codes:
    /// - -32700: Parse error
    /// - -32601: Method not found
    /// - -32602: Invalid params
    /// - -32603: Internal error
    ///
    /// Custom error codes (application-defined, -32000 to -32099):
    /// - -32000: Network/connectivity error
    /// - -32001: Transfer size limit exceeded
    /// - -32002: Data-integrity violation
    pub fn to_rpc_error_code(&self) -> i32 {
        match self {
            TransferError::Network { .. } | TransferError::Timeout(_) => -32000,

            TransferError::SizeLimit { .. } => -32001,

            TransferError::Integrity(_) => -32002,

            TransferError::MethodNotFound { .. } => -32601,

            TransferError::InvalidParams { .. } => -32602,

            TransferError::Json { .. } => -32700,

            // A remote error keeps the code it arrived with
            TransferError::Rpc { code, .. } => *code,

            TransferError::Other(_) => -32603,
        }
    }

    /// True when the call never reached (or never returned from) the peer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            TransferError::Network { .. } | TransferError::Timeout(_)
        )
    }
}
