use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;

use crate::models::scores::ComponentScores;

/// The discrete trading call.
#[derive(Serialize, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

/// Confidence ladder for the decision itself; one rung more than the
/// per-recommendation labels.
#[derive(Serialize, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DecisionConfidence {
    VeryHigh,
    High,
    Medium,
    Low,
}

#[derive(Serialize, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Serialize, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimeHorizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

/// The complete decision record handed to the consuming service. Field names
/// and enum spellings are fixed by the boundary contract; the timestamp
/// serializes as ISO-8601 through chrono's serde support.
///
/// Created fresh per request and never mutated or persisted by this crate.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TradingDecision {
    pub decision: Decision,
    pub price_target: f64,
    pub current_price: f64,
    pub confidence: DecisionConfidence,
    pub overall_score: f64,
    pub component_scores: ComponentScores,
    pub explanation: String,
    pub risk_level: RiskLevel,
    pub time_horizon: TimeHorizon,
    pub decision_timestamp: DateTime<Utc>,
}
