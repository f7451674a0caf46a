use crate::errors::ServiceError;
use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Decodes a JSON request body.
///
/// An empty body reads as `{}` so that absent fields surface as missing
/// rather than malformed.
pub fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ServiceError> {
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };

    serde_json::from_slice(raw).map_err(|e| {
        debug!(error = %e, "Rejected request body");
        ServiceError::MalformedBody(e.to_string())
    })
}

/// Treats `None` and blank strings alike.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Reads a submitted record id with storefront truthiness.
///
/// `null`, `false`, `0` and `""` are absent. Any other non-string value is
/// kept in its JSON text form, which the store then fails to parse.
pub fn submitted_id(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64().is_some_and(|f| f == 0.0) => None,
        Value::String(s) => non_empty(Some(s)),
        other => Some(other.to_string()),
    }
}
