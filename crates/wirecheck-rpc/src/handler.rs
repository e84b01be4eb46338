//! JSON-RPC request handlers.

use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};
use wirecheck_core::{
    HelloRequest, ReadRequest, TransferError, TransferService, WriteRequest,
};

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
            id,
        }
    }
}

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Main JSON-RPC handler.
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    let method = &request.method;
    let params = request.params.unwrap_or(Value::Object(Default::default()));
    let id = request.id.clone();

    debug!("RPC call: {}", method);

    // Handle built-in methods
    if method == "health_check" {
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::success(id, json!({"status": "ok"}))),
        );
    }

    let result = dispatch_method(&state.service, method, params);

    match result {
        Ok(value) => (StatusCode::OK, Json(JsonRpcResponse::success(id, value))),
        Err(e) => {
            warn!("RPC error for {}: {}", method, e);
            let code = e.to_rpc_error_code();
            (
                StatusCode::OK,
                Json(JsonRpcResponse::error(id, code, e.to_string())),
            )
        }
    }
}

/// Deserialize `params` into a typed request or fail with InvalidParams.
fn parse_params<T: serde::de::DeserializeOwned>(
    params: Value,
) -> Result<T, TransferError> {
    serde_json::from_value(params).map_err(|e| TransferError::InvalidParams {
        message: e.to_string(),
    })
}

/// Dispatch a method call to the transfer service.
fn dispatch_method(
    service: &TransferService,
    method: &str,
    params: Value,
) -> Result<Value, TransferError> {
    match method {
        "say_hello" => {
            let request: HelloRequest = parse_params(params)?;
            let reply = service.say_hello(&request);
            Ok(serde_json::to_value(reply)?)
        }

        "read_data" => {
            let request: ReadRequest = parse_params(params)?;
            let reply = service.read_data(&request)?;
            Ok(serde_json::to_value(reply)?)
        }

        "write_data" => {
            let request: WriteRequest = parse_params(params)?;
            // The mismatch is diagnostic only; the RPC result stays a success
            let (reply, mismatch) = service.write_data(&request)?;
            if let Some(m) = mismatch {
                warn!(
                    "write_data payload failed validation at index {} (byte {}, expected {})",
                    m.index, m.actual, m.expected
                );
            }
            Ok(serde_json::to_value(reply)?)
        }

        _ => {
            warn!("Method not found: {}", method);
            Err(TransferError::MethodNotFound {
                method: method.to_string(),
            })
        }
    }
}
