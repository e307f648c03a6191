use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Overall sentiment direction attached to a snapshot by the upstream scorer.
#[derive(Serialize, Deserialize, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SentimentLabel {
    Bullish,
    Neutral,
    Bearish,
}

/// Precomputed sentiment scores for one ticker, supplied by the collaborator
/// that classifies news text. The engine never sees raw articles.
///
/// Scores are expected in [-1, 1] and confidences in [0, 1]; out-of-range
/// inputs are clamped at the point of use rather than rejected. The snapshot
/// is optional everywhere: its absence means "score sentiment as neutral",
/// not an error.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SentimentSnapshot {
    pub news_score: f64,
    pub news_confidence: f64,
    pub stock_score: f64,
    pub combined_score: f64,
    pub label: SentimentLabel,
}
