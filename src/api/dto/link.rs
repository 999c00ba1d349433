//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request body for `POST /api/shorten`.
///
/// `long_url` is optional at the serde level so a missing field is reported
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub long_url: Option<String>,

    /// Blank values are treated as absent and a code is generated.
    #[validate(length(max = 64, message = "Custom code is too long"))]
    pub custom_code: Option<String>,
}

/// Wire representation of a stored link.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            long_url: link.long_url,
            short_code: link.short_code,
            clicks: link.clicks,
            created_at: link.created_at,
            last_clicked: link.last_clicked,
        }
    }
}

/// Response body for a successful delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
