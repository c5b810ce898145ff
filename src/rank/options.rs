//! Ranking options and score weights.

use chrono::{DateTime, Utc};

/// Weights applied when combining keyword match counts into a raw score.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    /// Weight per distinct persona-keyword match
    pub persona: f64,
    /// Weight per distinct job-keyword match
    pub job: f64,
    /// Flat bonus when the total distinct match count reaches `bonus_matches`
    pub bonus: f64,
    /// Distinct match count that triggers the bonus
    pub bonus_matches: usize,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            persona: 0.3,
            job: 0.5,
            bonus: 0.2,
            bonus_matches: 3,
        }
    }
}

/// Options for relevance scoring and excerpt refinement.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Score weights
    pub weights: ScoreWeights,

    /// Number of top-ranked sections that get a refined excerpt
    pub top_k: usize,

    /// Target excerpt length in characters
    pub excerpt_chars: usize,

    /// Body length (characters) at which the length discount reaches its
    /// first doubling step
    pub length_discount_pivot: usize,

    /// Timestamp stamped into the analysis metadata; `None` means now.
    /// Injectable so tests produce byte-identical output.
    pub timestamp: Option<DateTime<Utc>>,
}

impl RankOptions {
    /// Create new rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set how many top sections receive refined excerpts.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Pin the metadata timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            top_k: 5,
            excerpt_chars: 500,
            length_discount_pivot: 500,
            timestamp: None,
        }
    }
}
