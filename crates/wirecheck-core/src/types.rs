//! Wire types for the three wirecheck RPC operations.
//!
//! All requests and replies are plain serde structs; payload bytes travel
//! base64-encoded inside the JSON-RPC envelope. Each value lives for a single
//! request/response cycle and is discarded afterwards.

use serde::{Deserialize, Serialize};

/// Request for the greeting exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloRequest {
    pub name: String,
}

/// Reply for the greeting exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloReply {
    pub message: String,
}

/// Request for a server-generated byte buffer of the given size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReadRequest {
    #[serde(alias = "numBytes")]
    pub num_bytes: u32,
}

/// Reply carrying the server-generated buffer.
///
/// Invariant: `data.len() == num_bytes` (the read client verifies this).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadReply {
    #[serde(alias = "numBytes")]
    pub num_bytes: u32,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Request carrying a client-supplied byte buffer.
///
/// `num_bytes` is set verbatim by the caller; the operation does not check it
/// against `data.len()` before sending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteRequest {
    #[serde(alias = "numBytes")]
    pub num_bytes: u32,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Reply acknowledging a write. `num_bytes` echoes the request field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WriteReply {
    #[serde(alias = "numBytes")]
    pub num_bytes: u32,
}

/// Serde helper for byte payloads carried as base64 strings in JSON.
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{fill, WRITE_SENTINEL};

    #[test]
    fn test_payload_travels_as_base64_string() {
        let request = WriteRequest {
            num_bytes: 4,
            data: fill(4, WRITE_SENTINEL),
        };
        let json = serde_json::to_value(&request).unwrap();
        // b"EEEE" base64-encodes to "RUVFRQ=="
        assert_eq!(json["data"], serde_json::json!("RUVFRQ=="));

        let decoded: WriteRequest = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.data, request.data);
    }

    #[test]
    fn test_camel_case_aliases_accepted() {
        let reply: WriteReply = serde_json::from_str(r#"{"numBytes": 7}"#).unwrap();
        assert_eq!(reply.num_bytes, 7);
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let result: Result<ReadReply, _> =
            serde_json::from_str(r#"{"num_bytes": 4, "data": "not base64!!"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_payload() {
        let reply = ReadReply {
            num_bytes: 0,
            data: Vec::new(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        let decoded: ReadReply = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, reply);
    }
}
