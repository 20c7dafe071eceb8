//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/messages`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublishMessageRequest {
    pub text: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Error body returned by the HTTP API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
