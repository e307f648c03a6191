//! Configuration for the analysis engine.

pub mod analysis;

// Re-export commonly used items
pub use analysis::{
    AnalysisConfig, DEFAULT_ANALYSIS, DecisionThresholds, HorizonSettings, IndicatorSettings,
    RiskCutoffs, ScoringSettings, ScoringWeights, SignalSettings, TargetSettings,
};
