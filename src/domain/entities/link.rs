//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with click metadata.
///
/// `clicks` and `last_clicked` are only changed by the redirect path; every
/// other field is immutable once the row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        long_url: String,
        short_code: String,
        clicks: i64,
        created_at: DateTime<Utc>,
        last_clicked: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            long_url,
            short_code,
            clicks,
            created_at,
            last_clicked,
        }
    }

    /// Returns true if the link has been visited at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub long_url: String,
    pub short_code: String,
}
