// Analysis stages and the single-pass pipeline tying them together
pub mod decision;
pub mod indicators;
pub mod scoring;
pub mod signals;

// Re-export the stage entry points
pub use decision::{make_decision, overall_score};
pub use indicators::compute_indicators;
pub use scoring::component_scores;
pub use signals::recommendations;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::domain::{CandleSeries, PriceChangeStats, SentimentSnapshot};
use crate::error::AnalysisError;
use crate::models::{ComponentScores, IndicatorSet, Recommendation, TradingDecision};

/// Everything one analysis request produces.
#[derive(Serialize, Debug, Clone)]
pub struct AnalysisReport {
    pub indicators: IndicatorSet,
    pub component_scores: ComponentScores,
    pub decision: TradingDecision,
    pub recommendations: Vec<Recommendation>,
}

/// Run the full pipeline for one request: indicators, component scores,
/// decision and recommendations, in strict data-flow order.
///
/// Price-change statistics are derived from the series timestamps; hosts
/// with their own session calendar can call [`analyze_with_changes`]
/// instead. Pure apart from the decision timestamp, so concurrent calls for
/// different tickers never interfere.
pub fn analyze(
    series: &CandleSeries,
    sentiment: Option<&SentimentSnapshot>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let changes = PriceChangeStats::from_series(series);
    analyze_with_changes(series, sentiment, &changes, config)
}

/// As [`analyze`], with caller-supplied price-change statistics.
pub fn analyze_with_changes(
    series: &CandleSeries,
    sentiment: Option<&SentimentSnapshot>,
    changes: &PriceChangeStats,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let indicators = compute_indicators(series, config);
    if indicators.is_unavailable() {
        return Err(AnalysisError::InsufficientData {
            bars: series.len(),
            min_bars: config.min_bars_for_any_indicator(),
        });
    }

    let scores = component_scores(&indicators, sentiment, changes, config);
    let decision = make_decision(scores, series.latest_close(), indicators.volatility, config);
    let recommendations = recommendations(&indicators, sentiment, series.latest_close(), config);

    log::debug!(
        "analysis complete: {} at {:.4} with {} recommendations",
        decision.decision,
        decision.overall_score,
        recommendations.len()
    );

    Ok(AnalysisReport {
        indicators,
        component_scores: scores,
        decision,
        recommendations,
    })
}
