//! Size-constrained display layout for matched candidate places.

use placelens_core::types::{
    labels_equal_fold, CategoryBucket, CategoryGroup, DisplayLayout, MatchedCandidate,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Layout policy bounds. Callers may override via configuration; the
/// defaults are the product-approved values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchLimits {
    pub min_per_category: usize,
    pub max_per_category: usize,
    pub max_total: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            min_per_category: 2,
            max_per_category: 5,
            max_total: 5,
        }
    }
}

#[derive(Default)]
pub struct MatchLimiter {
    limits: MatchLimits,
}

impl MatchLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: MatchLimits) -> Self {
        Self { limits }
    }

    /// Produce the final display layout.
    ///
    /// With non-empty groups, each group is resolved against the
    /// candidate pools (matched first), capped, and dropped entirely
    /// when undersized. When no groups survive (or none were given),
    /// falls back to one flat list: matched candidates by descending
    /// score ahead of unmatched candidates in input order, truncated.
    /// Empty inputs yield an empty flat layout, never an error.
    pub fn limit(
        &self,
        matched: &[MatchedCandidate],
        unmatched: &[MatchedCandidate],
        groups: Option<&[CategoryGroup]>,
    ) -> DisplayLayout {
        if let Some(groups) = groups {
            if !groups.is_empty() {
                let buckets = self.grouped(matched, unmatched, groups);
                if !buckets.is_empty() {
                    return DisplayLayout::Grouped(buckets);
                }
            }
        }
        DisplayLayout::Flat(self.flat(matched, unmatched))
    }

    /// Groups are independent: a place named in two groups appears in
    /// both buckets, and no cross-group deduplication happens here.
    fn grouped(
        &self,
        matched: &[MatchedCandidate],
        unmatched: &[MatchedCandidate],
        groups: &[CategoryGroup],
    ) -> Vec<CategoryBucket> {
        let mut buckets = Vec::new();
        for group in groups {
            let mut places: Vec<MatchedCandidate> = Vec::new();
            for name in &group.place_names {
                if places.len() >= self.limits.max_per_category {
                    break;
                }
                let candidate =
                    find_by_name(matched, name).or_else(|| find_by_name(unmatched, name));
                if let Some(candidate) = candidate {
                    places.push(candidate.clone());
                }
            }
            if places.len() < self.limits.min_per_category {
                debug!(title = %group.title, count = places.len(), "dropping undersized group");
                continue;
            }
            buckets.push(CategoryBucket {
                title: group.title.clone(),
                places,
            });
        }
        buckets
    }

    fn flat(&self, matched: &[MatchedCandidate], unmatched: &[MatchedCandidate]) -> Vec<MatchedCandidate> {
        let mut pool: Vec<MatchedCandidate> = matched.to_vec();
        // Stable sort keeps input order among equal scores.
        pool.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
        });
        pool.extend(unmatched.iter().cloned());
        pool.truncate(self.limits.max_total);
        pool
    }
}

/// First candidate whose name matches, case-insensitively after
/// trimming. Matched-pool lookups happen before unmatched ones, so a
/// name present in both resolves to the matched candidate.
fn find_by_name<'a>(pool: &'a [MatchedCandidate], name: &str) -> Option<&'a MatchedCandidate> {
    pool.iter().find(|c| labels_equal_fold(&c.name, name))
}
