//! Follower and play-count heuristics.
//!
//! Neither figure is measured. Listing pages expose only per-post likes,
//! comments and shares; these functions map them to rough audience numbers
//! with empirical constants. Consumers should treat the outputs as
//! approximate and never as a creator's real follower count.

use tagscout_core::EngagementCounts;

/// Empirical constants behind the estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heuristics {
    pub like_weight: u64,
    pub comment_weight: u64,
    pub share_weight: u64,
    /// Followers per point of weighted engagement.
    pub follower_multiplier: u64,
    /// Lower clamp for any non-zero estimate.
    pub min_followers: u64,
    /// Upper clamp; keeps one viral post from implying billions of followers.
    pub max_followers: u64,
    /// Plays assumed per like.
    pub plays_per_like: u64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            like_weight: 1,
            comment_weight: 5,
            share_weight: 10,
            follower_multiplier: 30,
            min_followers: 100,
            max_followers: 1_000_000,
            plays_per_like: 20,
        }
    }
}

impl Heuristics {
    /// Weighted engagement score: comments and shares count for more than
    /// likes.
    #[must_use]
    pub fn engagement_score(&self, counts: EngagementCounts) -> u64 {
        counts
            .likes
            .saturating_mul(self.like_weight)
            .saturating_add(counts.comments.saturating_mul(self.comment_weight))
            .saturating_add(counts.shares.saturating_mul(self.share_weight))
    }
}

/// Estimates a follower count from one post's engagement.
///
/// Returns `0` when there is no engagement at all; otherwise
/// `score × follower_multiplier` clamped to
/// `[min_followers, max_followers]`.
#[must_use]
pub fn estimate_followers(counts: EngagementCounts, heuristics: &Heuristics) -> u64 {
    let score = heuristics.engagement_score(counts);
    if score == 0 {
        return 0;
    }

    score
        .saturating_mul(heuristics.follower_multiplier)
        .max(heuristics.min_followers)
        .min(heuristics.max_followers)
}

/// Estimates a play count from likes.
#[must_use]
pub fn estimate_plays(likes: u64, heuristics: &Heuristics) -> u64 {
    likes.saturating_mul(heuristics.plays_per_like)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(likes: u64, comments: u64, shares: u64) -> EngagementCounts {
        EngagementCounts {
            likes,
            comments,
            shares,
        }
    }

    fn estimate(likes: u64, comments: u64, shares: u64) -> u64 {
        estimate_followers(counts(likes, comments, shares), &Heuristics::default())
    }

    #[test]
    fn no_engagement_estimates_zero() {
        assert_eq!(estimate(0, 0, 0), 0);
    }

    #[test]
    fn ten_likes_estimates_three_hundred() {
        assert_eq!(estimate(10, 0, 0), 300);
    }

    #[test]
    fn single_like_is_clamped_to_minimum() {
        assert_eq!(estimate(1, 0, 0), 100);
    }

    #[test]
    fn comments_and_shares_are_weighted() {
        // 2*1 + 3*5 + 4*10 = 57 -> 57 * 30
        assert_eq!(estimate(2, 3, 4), 1_710);
    }

    #[test]
    fn viral_post_is_clamped_to_maximum() {
        assert_eq!(estimate(5_000_000, 0, 0), 1_000_000);
    }

    #[test]
    fn extreme_counts_do_not_overflow() {
        assert_eq!(estimate(u64::MAX, u64::MAX, u64::MAX), 1_000_000);
    }

    #[test]
    fn estimates_stay_in_allowed_range() {
        let samples = [0, 1, 3, 7, 33, 100, 3_333, 40_000, 1_000_000];
        for &likes in &samples {
            for &comments in &samples {
                for &shares in &samples {
                    let value = estimate(likes, comments, shares);
                    assert!(
                        value == 0 || (100..=1_000_000).contains(&value),
                        "estimate({likes}, {comments}, {shares}) = {value}"
                    );
                }
            }
        }
    }

    #[test]
    fn estimate_is_monotonic_in_each_input() {
        let samples = [0, 1, 2, 5, 50, 500, 5_000, 50_000];
        for &base in &samples {
            for window in samples.windows(2) {
                let (lo, hi) = (window[0], window[1]);
                assert!(estimate(lo, base, base) <= estimate(hi, base, base));
                assert!(estimate(base, lo, base) <= estimate(base, hi, base));
                assert!(estimate(base, base, lo) <= estimate(base, base, hi));
            }
        }
    }

    #[test]
    fn plays_are_twenty_per_like() {
        assert_eq!(estimate_plays(15, &Heuristics::default()), 300);
    }

    #[test]
    fn custom_heuristics_are_honoured() {
        let heuristics = Heuristics {
            follower_multiplier: 10,
            min_followers: 1,
            ..Heuristics::default()
        };
        assert_eq!(estimate_followers(counts(3, 0, 0), &heuristics), 30);
    }
}
