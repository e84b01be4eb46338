//! Wirecheck RPC - JSON-RPC surface for the byte-transfer integrity service.
//!
//! The server side puts [`wirecheck_core::TransferService`] behind an axum
//! HTTP endpoint speaking JSON-RPC 2.0; the client side drives the three
//! operations over reqwest and validates replies against the sentinel
//! contract. The `wirecheck-rpc` binary exposes both through a CLI.

pub mod client;
pub mod handler;
pub mod server;

pub use client::{ReadOutcome, TransferClient, WriteOutcome};
pub use server::{start_server, ServerHandle};
