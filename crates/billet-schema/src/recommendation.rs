//! Recommendation settings — how related posts are picked for display.
//!
//! The schema only owns the configuration surface and the merge policy.
//! Turning `relatedTopics` tags into an actual candidate list is the
//! job of the external recommendation engine; it hands its candidates
//! to [`RecommendationSettings::select`] together with the manually
//! curated list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use billet_core::error::Violation;
use billet_core::reference::DocId;
use billet_core::validate;

/// Hard ceiling on rendered recommendations.
pub const MAX_RECOMMENDATIONS: i64 = 6;

/// Default number of rendered recommendations when unset.
pub const DEFAULT_MAX_RECOMMENDATIONS: i64 = 3;

/// Which source wins when both manual and automatic candidates exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    /// Only the manually curated list.
    Manual,
    /// Only tag-derived suggestions.
    Auto,
    /// Manual first, automatic suggestions fill the remaining slots.
    #[default]
    Mixed,
}

/// Per-post recommendation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationSettings {
    pub priority: RecommendationPriority,
    pub max_recommendations: i64,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            priority: RecommendationPriority::default(),
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
        }
    }
}

impl RecommendationSettings {
    /// Range check on `maxRecommendations`, anchored under `prefix`.
    #[must_use]
    pub fn validate(&self, prefix: &str) -> Vec<Violation> {
        let mut violations = Vec::new();
        validate::push(
            &mut violations,
            format!("{prefix}.maxRecommendations"),
            validate::int_between(self.max_recommendations, 0, MAX_RECOMMENDATIONS),
        );
        violations
    }

    /// Merge manual and automatic candidates according to the priority,
    /// dropping duplicates and truncating to `maxRecommendations`.
    #[must_use]
    pub fn select(&self, manual: &[DocId], auto: &[DocId]) -> Vec<DocId> {
        let cap = self.max_recommendations.clamp(0, MAX_RECOMMENDATIONS) as usize;

        let candidates: Vec<&DocId> = match self.priority {
            RecommendationPriority::Manual => manual.iter().collect(),
            RecommendationPriority::Auto => auto.iter().collect(),
            RecommendationPriority::Mixed => manual.iter().chain(auto.iter()).collect(),
        };

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|id| seen.insert(*id))
            .take(cap)
            .cloned()
            .collect()
    }
}
