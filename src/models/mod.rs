// Derived records produced by the analysis stages
// These are pure data, independent of how the host serves them

pub mod decision;
pub mod indicator_set;
pub mod recommendation;
pub mod scores;

// Re-export key types for convenience
pub use decision::{Decision, DecisionConfidence, RiskLevel, TimeHorizon, TradingDecision};
pub use indicator_set::{BollingerBands, IndicatorSet, MaTrend, MacdCrossover};
pub use recommendation::{IconTag, Recommendation, RecommendationKind, SignalConfidence};
pub use scores::ComponentScores;
