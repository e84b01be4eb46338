//! Client-side transfer driver.
//!
//! Builds requests, sends them over the JSON-RPC channel, and validates
//! replies against the sentinel contract. Validation is fail-fast: the first
//! violation is reported with its detail and ends the checks for that call.
//! No call is ever retried.

use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::debug;
use wirecheck_core::config::NetworkConfig;
use wirecheck_core::error::{IntegrityError, Result, TransferError};
use wirecheck_core::payload::{self, READ_SENTINEL, WRITE_SENTINEL};
use wirecheck_core::types::{HelloReply, ReadReply, WriteReply, WriteRequest};

use crate::handler::JsonRpcResponse;

/// Outcome of a successful, fully validated read round trip.
#[derive(Debug, Clone, Copy)]
pub struct ReadOutcome {
    pub num_bytes: u32,
    /// Round-trip time, measured client-side as an observability concern.
    pub elapsed: Duration,
}

/// Outcome of a successful write round trip.
#[derive(Debug, Clone, Copy)]
pub struct WriteOutcome {
    /// The size echoed back by the server.
    pub num_bytes: u32,
    pub elapsed: Duration,
}

/// JSON-RPC client for the wirecheck transfer service.
pub struct TransferClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TransferClient {
    /// Create a client for `endpoint` (e.g. `http://127.0.0.1:50051`).
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(NetworkConfig::REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Greeting exchange.
    pub async fn say_hello(&self, name: &str) -> Result<String> {
        let value = self.call("say_hello", json!({ "name": name })).await?;
        let reply: HelloReply = serde_json::from_value(value)?;
        Ok(reply.message)
    }

    /// Request `num_bytes` of server-generated data and validate the reply.
    ///
    /// Checks, in order: echoed size, payload length, then every byte against
    /// the read sentinel. The first violation is returned as
    /// [`TransferError::Integrity`] and ends validation for this call.
    pub async fn read_data(&self, num_bytes: u32) -> Result<ReadOutcome> {
        debug!("Sending read request for {} bytes", num_bytes);
        let start = Instant::now();
        let value = self
            .call("read_data", json!({ "num_bytes": num_bytes }))
            .await?;
        let elapsed = start.elapsed();

        let reply: ReadReply = serde_json::from_value(value)?;
        validate_read_reply(num_bytes, &reply)?;
        Ok(ReadOutcome { num_bytes, elapsed })
    }

    /// Send `num_bytes` of write-sentinel data.
    pub async fn write_data(&self, num_bytes: u32) -> Result<WriteOutcome> {
        self.write_bytes(num_bytes, payload::fill(num_bytes as usize, WRITE_SENTINEL))
            .await
    }

    /// Send an arbitrary buffer with an arbitrary declared size.
    ///
    /// The buffer is sent verbatim, with no pre-send content validation. The
    /// echoed size is verified against the declared size.
    pub async fn write_bytes(&self, num_bytes: u32, data: Vec<u8>) -> Result<WriteOutcome> {
        debug!(
            "Sending write request declaring {} bytes, payload length {}",
            num_bytes,
            data.len()
        );
        let request = WriteRequest { num_bytes, data };
        let start = Instant::now();
        let value = self
            .call("write_data", serde_json::to_value(&request)?)
            .await?;
        let elapsed = start.elapsed();

        let reply: WriteReply = serde_json::from_value(value)?;
        if reply.num_bytes != num_bytes {
            return Err(IntegrityError::SizeMismatch {
                expected: num_bytes,
                actual: reply.num_bytes,
            }
            .into());
        }
        Ok(WriteOutcome {
            num_bytes: reply.num_bytes,
            elapsed,
        })
    }

    /// Perform one JSON-RPC call and unwrap the result payload.
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let response = self
            .http
            .post(format!("{}/rpc", self.endpoint))
            .json(&json!({
                "jsonrpc": "2.0",
                "method": method,
                "params": params,
                "id": 1
            }))
            .send()
            .await?;

        let payload: JsonRpcResponse = response.json().await?;
        if let Some(error) = payload.error {
            return Err(TransferError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(payload.result.unwrap_or(Value::Null))
    }
}

/// Validate a read reply against the requested size and the read sentinel.
///
/// Fail-fast: stops at the first violation rather than aggregating.
pub fn validate_read_reply(
    requested: u32,
    reply: &ReadReply,
) -> std::result::Result<(), IntegrityError> {
    if reply.num_bytes != requested {
        return Err(IntegrityError::SizeMismatch {
            expected: requested,
            actual: reply.num_bytes,
        });
    }
    if reply.data.len() != reply.num_bytes as usize {
        return Err(IntegrityError::LengthMismatch {
            declared: reply.num_bytes,
            actual: reply.data.len(),
        });
    }
    if let Some((index, actual)) = payload::first_mismatch(&reply.data, READ_SENTINEL) {
        return Err(IntegrityError::ByteMismatch {
            index,
            expected: READ_SENTINEL,
            actual,
        });
    }
    Ok(())
}
