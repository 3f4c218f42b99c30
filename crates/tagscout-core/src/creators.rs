use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform a creator was discovered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Tiktok,
    Instagram,
}

impl Platform {
    /// Lowercase tag used in identities and serialized output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tiktok => "tiktok",
            Self::Instagram => "instagram",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outreach lifecycle of a creator. Discovery only ever produces
/// [`CreatorStatus::Discovered`]; later stages belong to outreach tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatorStatus {
    #[default]
    Discovered,
    Analyzing,
    Qualified,
    Contacted,
    Responded,
    Interested,
    Negotiating,
    Partnered,
    Rejected,
    Blacklisted,
}

/// A creator surfaced by a discovery run, keyed by `handle`.
///
/// `estimated_followers` is a snapshot taken from the first post observed
/// for the handle and is an approximation, never a measured count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorRecord {
    #[serde(rename = "username")]
    pub handle: String,
    pub platform: Platform,
    pub estimated_followers: u64,
    pub engagement_rate: f64,
    pub status: CreatorStatus,
    pub contact_attempts: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreatorRecord {
    /// Creates a freshly discovered creator with zero contact attempts.
    #[must_use]
    pub fn discovered(
        handle: impl Into<String>,
        platform: Platform,
        estimated_followers: u64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            handle: handle.into(),
            platform,
            estimated_followers,
            engagement_rate: 0.0,
            status: CreatorStatus::Discovered,
            contact_attempts: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
