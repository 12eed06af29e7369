//! Shared helper functions for MCP tool implementations.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::{json, Value};

use etoro_client::{ClientError, ClientResult, ResponseBody};

/// Build a structured error JSON string that LLMs can parse.
pub fn error_json(error_code: &str, message: &str) -> String {
    json!({
        "error": error_code,
        "message": message,
    })
    .to_string()
}

/// Structured error JSON for a client failure.
///
/// API errors also carry the upstream `status` and, when the response had a
/// body, its decoded content as `details`.
pub fn client_error_json(err: &ClientError) -> String {
    let mut payload = json!({
        "error": error_code(err),
        "message": err.to_string(),
    });
    if let ClientError::Api { status, body, .. } = err {
        payload["status"] = json!(status);
        if !body.is_empty() {
            payload["details"] = body.clone().into_value();
        }
    }
    payload.to_string()
}

fn error_code(err: &ClientError) -> &'static str {
    match err {
        ClientError::Http(_) => "transport_error",
        ClientError::Api { .. } => "api_error",
        ClientError::Serialization(_) => "serialization_error",
        ClientError::Config(_) => "config_error",
        ClientError::PositionNotFound { .. } => "position_not_found",
        ClientError::InvalidInput(_) => "invalid_input",
        ClientError::InvalidResponse { .. } => "invalid_response",
    }
}

/// Tool result with the error flag set.
pub fn failure(message: String) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message)])
}

/// Pretty-printed JSON success result.
pub fn success<T: Serialize + ?Sized>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => failure(error_json("serialization_error", &e.to_string())),
    }
}

/// Success result for a raw upstream body.
///
/// Plain-text bodies are returned verbatim; an empty body renders as `null`.
pub fn body_success(body: ResponseBody) -> CallToolResult {
    match body {
        ResponseBody::Json(value) => success(&value),
        ResponseBody::Text(text) => CallToolResult::success(vec![Content::text(text)]),
        ResponseBody::Empty => success(&Value::Null),
    }
}

/// Wrap a typed operation outcome.
pub fn respond<T: Serialize>(result: ClientResult<T>) -> CallToolResult {
    match result {
        Ok(value) => success(&value),
        Err(e) => failure(client_error_json(&e)),
    }
}

/// Wrap a pass-through operation outcome.
pub fn respond_body(result: ClientResult<ResponseBody>) -> CallToolResult {
    match result {
        Ok(body) => body_success(body),
        Err(e) => failure(client_error_json(&e)),
    }
}
