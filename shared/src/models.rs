//! Shared data models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful chat response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerBody {
    pub answer: String,
}

/// Error response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Identity probe response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeBody {
    pub message: String,
    /// Raw `body` of the inbound event, echoed back unchanged.
    pub input: Value,
}
