//! HTTP helpers for Lambda functions.
//!
//! API Gateway's proxy integration expects the function to return
//! `{statusCode, headers, body}` with `body` already JSON-encoded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ErrorBody;
use crate::{Error, Result};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";

/// Proxy-integration response returned by every handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    /// Create a JSON response with the given status code and data.
    pub fn json<T: Serialize>(status: u16, data: &T) -> Result<Self> {
        Ok(Self {
            status_code: status,
            headers: default_headers(),
            body: serde_json::to_string(data)?,
        })
    }

    /// Create an error response with the given status code and message.
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_string(&ErrorBody::new(message))
            .unwrap_or_else(|_| r#"{"error":"Internal server error"}"#.to_string());

        Self {
            status_code: status,
            headers: default_headers(),
            body,
        }
    }

    /// Translate a handler error into its client-facing response.
    pub fn from_error(err: &Error) -> Self {
        Self::error(err.status_code(), err.client_message())
    }
}

/// Headers attached to every response: JSON content and open CORS.
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        (CONTENT_TYPE.to_string(), "application/json".to_string()),
        (ALLOW_ORIGIN.to_string(), "*".to_string()),
    ])
}
