//! Core types for lead-gate

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A captured lead: who asked for which business case, and when
///
/// Serialized with camelCase field names so the on-disk store stays
/// compatible with existing `leads.json` files:
///
/// ```json
/// { "email": "a@b.com", "businessCaseId": "bc1-production-knowledge", "timestamp": "2024-05-01T09:30:00.000Z" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    /// Email address supplied by the visitor
    pub email: String,
    /// Catalog id of the requested business case
    pub business_case_id: String,
    /// ISO-8601 UTC timestamp with millisecond precision
    pub timestamp: String,
}

impl LeadRecord {
    /// Create a record stamped with the current time
    pub fn new(email: impl Into<String>, business_case_id: impl Into<String>) -> Self {
        Self::at(email, business_case_id, Utc::now())
    }

    /// Create a record stamped with the given time
    pub fn at(
        email: impl Into<String>,
        business_case_id: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            email: email.into(),
            business_case_id: business_case_id.into(),
            timestamp: format_timestamp(at),
        }
    }
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
