//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Chat request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub project_id: i64,
    pub message: String,
}

/// Chat response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
}
