//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`leads`] - Email-gated downloads and lead export
//! - [`system`] - Health and OpenAPI

use serde::{Deserialize, Deserializer, Serialize};

mod leads;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use leads::*;
pub use system::*;

// ============================================================================
// Request/Response Types (shared across handlers)
// ============================================================================

/// Request body for POST /api/download
///
/// Missing or non-string fields read as empty strings and fail validation.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DownloadRequest {
    /// Visitor's email address
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    /// Catalog id of the requested business case
    #[serde(
        rename = "businessCaseId",
        default,
        deserialize_with = "string_or_empty"
    )]
    pub business_case_id: String,
}

/// Response body for a successful POST /api/download
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DownloadResponse {
    /// Always true
    pub success: bool,
}

/// Response body for GET /health
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// Always "ok"
    pub status: String,
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}
