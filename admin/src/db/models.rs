//! Database Models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User account model.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub date_joined: DateTime<Utc>,
}

/// Rows removed alongside an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeSummary {
    /// Profile rows (0 or 1).
    pub profiles: u64,
    /// Education history entries.
    pub education: u64,
    /// Certification entries.
    pub certifications: u64,
    /// Achievement entries.
    pub achievements: u64,
}

impl PurgeSummary {
    /// Total dependent rows removed.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.profiles + self.education + self.certifications + self.achievements
    }
}
