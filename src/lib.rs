//! Deterministic trading-signal engine: candle history plus an optional
//! sentiment snapshot in, a scored BUY/SELL/HOLD decision with price target,
//! risk, horizon, explanation and actionable recommendations out.

// Core modules
pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{AnalysisReport, analyze, analyze_with_changes};
pub use config::{AnalysisConfig, DEFAULT_ANALYSIS};
pub use domain::{Bar, CandleSeries, PriceChangeStats, SentimentLabel, SentimentSnapshot};
pub use error::AnalysisError;
pub use models::{ComponentScores, Decision, IndicatorSet, Recommendation, TradingDecision};
