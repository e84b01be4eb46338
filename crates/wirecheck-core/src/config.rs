//! Centralized configuration for wirecheck.
//!
//! This module provides configuration constants for the network endpoint,
//! client timeouts, and transfer size limits.

use std::time::Duration;

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    /// Default bind/connect host.
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    /// Default port, matching the original fixed endpoint.
    pub const DEFAULT_PORT: u16 = 50051;
    /// Client-side timeout for a single RPC round trip.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
}

/// Transfer size limits.
pub struct TransferLimits;

impl TransferLimits {
    /// Maximum accepted size for a single read or write payload.
    ///
    /// The declared size field is checked against this bound before any
    /// allocation happens; larger requests fail with
    /// [`TransferError::SizeLimit`](crate::TransferError::SizeLimit).
    pub const MAX_TRANSFER_BYTES: u32 = 64 * 1024 * 1024; // 64MB
}
