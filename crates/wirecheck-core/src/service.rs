//! Server-side semantics for the three RPC operations.
//!
//! The service is stateless: every call allocates (or inspects) its own
//! buffer and releases it when the call returns. Validation failures on the
//! write path are observed and reported, never turned into RPC failures.

use tracing::{debug, warn};

use crate::config::TransferLimits;
use crate::error::{Result, TransferError};
use crate::payload::{self, READ_SENTINEL, WRITE_SENTINEL};
use crate::types::{HelloReply, HelloRequest, ReadReply, ReadRequest, WriteReply, WriteRequest};

/// A sentinel mismatch observed while scanning a write payload.
///
/// This is a side-channel diagnostic: the write RPC still succeeds when one
/// is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    pub expected: u8,
    pub actual: u8,
}

/// Handler for the wirecheck RPC operations.
#[derive(Debug, Clone, Default)]
pub struct TransferService;

impl TransferService {
    pub fn new() -> Self {
        Self
    }

    /// Greeting exchange.
    pub fn say_hello(&self, request: &HelloRequest) -> HelloReply {
        HelloReply {
            message: format!("Hello {}", request.name),
        }
    }

    /// Synthesize a buffer of `num_bytes` read-sentinel bytes.
    ///
    /// Size zero is valid and returns an empty payload. Sizes above
    /// [`TransferLimits::MAX_TRANSFER_BYTES`] fail before any allocation.
    pub fn read_data(&self, request: &ReadRequest) -> Result<ReadReply> {
        debug!(
            "Received read request for {} bytes of data",
            request.num_bytes
        );
        check_size(request.num_bytes)?;

        let reply = ReadReply {
            num_bytes: request.num_bytes,
            data: payload::fill(request.num_bytes as usize, READ_SENTINEL),
        };
        debug!(
            "Sending read reply with {} bytes of {}",
            reply.num_bytes, READ_SENTINEL
        );
        Ok(reply)
    }

    /// Inspect a client-supplied buffer and acknowledge its declared size.
    ///
    /// The reply echoes the request's `num_bytes` field, not the received
    /// payload length. The payload is scanned against the write sentinel;
    /// the first mismatch (if any) is returned alongside the reply and the
    /// call still succeeds.
    pub fn write_data(&self, request: &WriteRequest) -> Result<(WriteReply, Option<Mismatch>)> {
        debug!(
            "Received write request declaring {} bytes, payload length {}",
            request.num_bytes,
            request.data.len()
        );
        check_size(request.num_bytes)?;

        let mismatch =
            payload::first_mismatch(&request.data, WRITE_SENTINEL).map(|(index, actual)| {
                Mismatch {
                    index,
                    expected: WRITE_SENTINEL,
                    actual,
                }
            });
        if let Some(m) = mismatch {
            warn!(
                "Write payload byte at index {} is {}, expected sentinel {}",
                m.index, m.actual, m.expected
            );
        }

        // Echo semantics: report the declared size, not data.len()
        Ok((
            WriteReply {
                num_bytes: request.num_bytes,
            },
            mismatch,
        ))
    }
}

fn check_size(num_bytes: u32) -> Result<()> {
    if num_bytes > TransferLimits::MAX_TRANSFER_BYTES {
        return Err(TransferError::SizeLimit {
            requested: num_bytes as u64,
            max: TransferLimits::MAX_TRANSFER_BYTES as u64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::fill;

    #[test]
    fn test_say_hello() {
        let reply = TransferService::new().say_hello(&HelloRequest {
            name: "world".into(),
        });
        assert_eq!(reply.message, "Hello world");
    }

    #[test]
    fn test_read_fills_every_byte_with_sentinel() {
        let reply = TransferService::new()
            .read_data(&ReadRequest { num_bytes: 4096 })
            .unwrap();
        assert_eq!(reply.num_bytes, 4096);
        assert_eq!(reply.data.len(), 4096);
        assert!(reply.data.iter().all(|b| *b == READ_SENTINEL));
    }

    #[test]
    fn test_read_zero_bytes_is_not_an_error() {
        let reply = TransferService::new()
            .read_data(&ReadRequest { num_bytes: 0 })
            .unwrap();
        assert_eq!(reply.num_bytes, 0);
        assert!(reply.data.is_empty());
    }

    #[test]
    fn test_repeated_reads_are_bit_identical() {
        let service = TransferService::new();
        let first = service.read_data(&ReadRequest { num_bytes: 512 }).unwrap();
        let second = service.read_data(&ReadRequest { num_bytes: 512 }).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_read_over_limit_is_rejected() {
        let err = TransferService::new()
            .read_data(&ReadRequest {
                num_bytes: TransferLimits::MAX_TRANSFER_BYTES + 1,
            })
            .unwrap_err();
        assert!(matches!(err, TransferError::SizeLimit { .. }));
    }

    #[test]
    fn test_write_over_limit_is_rejected() {
        let err = TransferService::new()
            .write_data(&WriteRequest {
                num_bytes: TransferLimits::MAX_TRANSFER_BYTES + 1,
                data: Vec::new(),
            })
            .unwrap_err();
        assert!(matches!(err, TransferError::SizeLimit { .. }));
    }

    #[test]
    fn test_write_clean_payload_has_no_mismatch() {
        let (reply, mismatch) = TransferService::new()
            .write_data(&WriteRequest {
                num_bytes: 4096,
                data: fill(4096, WRITE_SENTINEL),
            })
            .unwrap();
        assert_eq!(reply.num_bytes, 4096);
        assert_eq!(mismatch, None);
    }

    #[test]
    fn test_write_reports_first_mismatch_but_still_succeeds() {
        let mut data = fill(10, WRITE_SENTINEL);
        data[3] = 70;
        let (reply, mismatch) = TransferService::new()
            .write_data(&WriteRequest { num_bytes: 10, data })
            .unwrap();
        assert_eq!(reply.num_bytes, 10);
        assert_eq!(
            mismatch,
            Some(Mismatch {
                index: 3,
                expected: WRITE_SENTINEL,
                actual: 70,
            })
        );
    }

    /// The reply size is an echo of the declared size, deliberately not
    /// recomputed from the payload actually received.
    #[test]
    fn test_write_reply_echoes_declared_size_not_payload_len() {
        let (reply, _) = TransferService::new()
            .write_data(&WriteRequest {
                num_bytes: 10,
                data: fill(4, WRITE_SENTINEL),
            })
            .unwrap();
        assert_eq!(reply.num_bytes, 10);
    }

    #[test]
    fn test_write_empty_payload() {
        let (reply, mismatch) = TransferService::new()
            .write_data(&WriteRequest {
                num_bytes: 0,
                data: Vec::new(),
            })
            .unwrap();
        assert_eq!(reply.num_bytes, 0);
        assert_eq!(mismatch, None);
    }
}
