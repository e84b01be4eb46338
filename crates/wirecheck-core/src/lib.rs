//! Wirecheck Core - Headless library for the byte-transfer integrity service.
//!
//! This crate provides the wire types, sentinel payload helpers, and server-side
//! semantics for the three wirecheck RPC operations (`say_hello`, `read_data`,
//! `write_data`). It can be used programmatically without any HTTP/RPC layer;
//! the `wirecheck-rpc` crate puts it behind a JSON-RPC server and client.
//!
//! # Example
//!
//! ```rust
//! use wirecheck_core::{payload, ReadRequest, TransferService};
//!
//! let service = TransferService::new();
//! let reply = service.read_data(&ReadRequest { num_bytes: 16 }).unwrap();
//! assert_eq!(reply.data.len(), 16);
//! assert!(payload::first_mismatch(&reply.data, payload::READ_SENTINEL).is_none());
//! ```

pub mod config;
pub mod error;
pub mod payload;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::{NetworkConfig, TransferLimits};
pub use error::{IntegrityError, Result, TransferError};
pub use service::{Mismatch, TransferService};
pub use types::{
    HelloReply, HelloRequest, ReadReply, ReadRequest, WriteReply, WriteRequest,
};
