use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::creators::Platform;
use crate::CoreError;

/// Raw engagement counts read off a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementCounts {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// One post observed on a hashtag listing page.
///
/// Fields are read-only after capture. `plays` and `estimated_followers` are
/// heuristic derivations from the engagement counts, not platform figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    id: String,
    #[serde(rename = "username")]
    handle: String,
    description: String,
    likes: u64,
    comments: u64,
    shares: u64,
    plays: u64,
    hashtags: Vec<String>,
    timestamp: DateTime<Utc>,
    estimated_followers: u64,
}

impl PostRecord {
    /// Captures a post, deriving its identity from `platform`, `handle` and
    /// the capture time (`{platform}_{handle}_{unix_seconds}`).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyHandle`] if `handle` is empty or whitespace.
    #[allow(clippy::too_many_arguments)]
    pub fn capture(
        platform: Platform,
        handle: &str,
        description: String,
        hashtags: Vec<String>,
        counts: EngagementCounts,
        plays: u64,
        estimated_followers: u64,
        captured_at: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(CoreError::EmptyHandle);
        }

        Ok(Self {
            id: format!("{platform}_{handle}_{}", captured_at.timestamp()),
            handle: handle.to_owned(),
            description,
            likes: counts.likes,
            comments: counts.comments,
            shares: counts.shares,
            plays,
            hashtags,
            timestamp: captured_at,
            estimated_followers,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn hashtags(&self) -> &[String] {
        &self.hashtags
    }

    #[must_use]
    pub fn counts(&self) -> EngagementCounts {
        EngagementCounts {
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
        }
    }

    #[must_use]
    pub fn plays(&self) -> u64 {
        self.plays
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn estimated_followers(&self) -> u64 {
        self.estimated_followers
    }
}
