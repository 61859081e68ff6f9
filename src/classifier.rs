//! Template matching classifier.

use tracing::{debug, warn};

use crate::config::MatchingConfig;
use crate::distance::sequence_distance;
use crate::math::direction_string;
use crate::template::{GestureKind, GestureTemplate, TemplateStore};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Result of matching one direction sequence against the store.
///
/// Serialize-only: an unscored result carries `score = +∞`, which JSON
/// writes as `null`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Classification {
    /// Matched kind, or `Invalid` when nothing was close enough.
    pub kind: GestureKind,
    /// Name of the closest template, reported even when rejected.
    pub best_template: Option<String>,
    /// Distance to the closest template. `INFINITY` when nothing was scored.
    pub score: f64,
    /// Whether `score` was within the acceptance threshold.
    pub accepted: bool,
}

impl Classification {
    /// A result with no candidate at all.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            kind: GestureKind::Invalid,
            best_template: None,
            score: f64::INFINITY,
            accepted: false,
        }
    }
}

/// Scores direction sequences against every template in a store.
#[derive(Debug, Clone)]
pub struct Classifier {
    store: TemplateStore,
    matching: MatchingConfig,
}

impl Classifier {
    #[must_use]
    pub fn new(store: TemplateStore, matching: MatchingConfig) -> Self {
        if store.is_empty() {
            warn!("classifier created with an empty template store; every stroke will be Invalid");
        }
        Self { store, matching }
    }

    /// Classify a direction sequence.
    ///
    /// Every template with a non-empty pattern is scored. The minimum wins,
    /// and on equal scores the template listed first wins. A minimum above
    /// the acceptance threshold yields `Invalid`, with the nearest template
    /// and its score still reported.
    #[must_use]
    pub fn classify(&self, directions: &[usize]) -> Classification {
        if directions.is_empty() || self.store.is_empty() {
            return Classification::invalid();
        }

        let bins = self.store.direction_bins();
        let mut best: Option<(&GestureTemplate, f64)> = None;

        for template in &self.store {
            if template.pattern().is_empty() {
                continue;
            }

            let score = sequence_distance(directions, template.pattern(), bins, &self.matching);
            if best.map_or(true, |(_, best_score)| score < best_score) {
                best = Some((template, score));
            }
        }

        let Some((template, score)) = best else {
            return Classification::invalid();
        };

        let accepted = score <= self.matching.accept_threshold;
        let kind = if accepted {
            template.kind()
        } else {
            GestureKind::Invalid
        };

        debug!(
            directions = %direction_string(directions),
            template = template.name(),
            score,
            accepted,
            %kind,
            "classified stroke"
        );

        Classification {
            kind,
            best_template: Some(template.name().to_string()),
            score,
            accepted,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &TemplateStore {
        &self.store
    }

    #[must_use]
    pub const fn matching(&self) -> &MatchingConfig {
        &self.matching
    }
}
