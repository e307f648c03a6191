//! Analysis and scoring configuration.
//!
//! Every weight, window and threshold the engine uses lives here as an
//! explicit value passed into each stage, so tests can vary them without
//! touching logic. `DEFAULT_ANALYSIS` carries the production defaults.

/// Windows and thresholds for the indicator engine.
#[derive(Debug, Clone)]
pub struct IndicatorSettings {
    pub rsi_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    pub bollinger_period: usize,
    // Band half-width in standard deviations
    pub bollinger_k: f64,
    pub sma_short_period: usize,
    pub sma_medium_period: usize,
    pub sma_long_period: usize,
    // Trailing window for support (min low) and resistance (max high)
    pub support_resistance_lookback: usize,
    // Number of simple returns in the volatility window
    pub volatility_window: usize,
    // Annualization: sqrt(periods_per_year) scales per-bar return stddev
    pub periods_per_year: f64,
    // Rolling average window for the volume anomaly ratio
    pub volume_window: usize,
    // Ratio above which volume counts as a spike
    pub volume_spike_ratio: f64,
    // Ratio below which volume counts as unusually thin
    pub volume_low_ratio: f64,
}

/// Component weights for the overall score. Must sum to 1.0 for the overall
/// score to stay inside [-1, 1].
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub technical: f64,
    pub sentiment: f64,
    pub momentum: f64,
    pub volatility: f64,
    pub volume: f64,
}

/// Shaping constants for the five component scores.
#[derive(Debug, Clone)]
pub struct ScoringSettings {
    // Blend weights for the sentiment component
    pub sentiment_combined_weight: f64,
    pub sentiment_news_weight: f64,
    pub sentiment_stock_weight: f64,
    // Blend weights for the 24h/7d/30d changes feeding momentum
    pub momentum_24h_weight: f64,
    pub momentum_7d_weight: f64,
    pub momentum_30d_weight: f64,
    // tanh(scale * blended fractional change); 25.0 saturates near a 4% move
    pub momentum_scale: f64,
    // Annualized volatility mapping to -1 at and beyond this level
    pub volatility_full_scale: f64,
    // Volume ratio above which volume counts as elevated (below spike)
    pub volume_elevated_ratio: f64,
}

/// Trigger thresholds for the recommendation generator.
#[derive(Debug, Clone)]
pub struct SignalSettings {
    // Price within this fraction above support counts as "near support"
    pub support_proximity: f64,
    // Price within this fraction below resistance counts as "near resistance"
    pub resistance_proximity: f64,
    // Price below SMA20 by this factor in an uptrend counts as a pullback dip
    pub pullback_dip_factor: f64,
    // Stop-loss placement: price must sit this far above support to suggest one
    pub stop_loss_buffer: f64,
    // Suggested stop sits this factor below support
    pub stop_loss_discount: f64,
    // |combined sentiment| needed to call a divergence against the trend
    pub divergence_threshold: f64,
    // Hard cap on the recommendation list
    pub max_recommendations: usize,
}

/// Classification thresholds and confidence ladder for the decision engine.
#[derive(Debug, Clone)]
pub struct DecisionThresholds {
    // overall >= buy_threshold => BUY, overall <= sell_threshold => SELL
    pub buy_threshold: f64,
    pub sell_threshold: f64,
    // |overall| cutoffs for the confidence label
    pub very_high_confidence: f64,
    pub high_confidence: f64,
    pub medium_confidence: f64,
}

/// Price target shaping: implied move = min(max_move,
/// |overall| * (base_scale + volatility_scale * min(vol / volatility_ref, 1))).
#[derive(Debug, Clone)]
pub struct TargetSettings {
    pub base_scale: f64,
    pub volatility_scale: f64,
    pub volatility_ref: f64,
    // Hard cap on the implied move, as a fraction of current price
    pub max_move: f64,
}

/// Annualized-volatility cutoffs for the risk label.
#[derive(Debug, Clone)]
pub struct RiskCutoffs {
    pub medium_above: f64,
    pub high_above: f64,
}

/// Volatility/momentum profile boundaries for the time-horizon label.
#[derive(Debug, Clone)]
pub struct HorizonSettings {
    // Volatility at or above this => short_term
    pub short_term_volatility: f64,
    // Volatility at or below this, with a strong trend => long_term
    pub long_term_volatility: f64,
    // |momentum| counting as a strong trend
    pub strong_trend_momentum: f64,
}

/// The master analysis configuration, passed into every stage.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub indicators: IndicatorSettings,
    pub weights: ScoringWeights,
    pub scoring: ScoringSettings,
    pub signals: SignalSettings,
    pub decision: DecisionThresholds,
    pub target: TargetSettings,
    pub risk: RiskCutoffs,
    pub horizon: HorizonSettings,
}

impl AnalysisConfig {
    /// The shortest history any single indicator can work with. Below this the
    /// whole set is unavailable and analysis fails with `InsufficientData`.
    pub fn min_bars_for_any_indicator(&self) -> usize {
        let ind = &self.indicators;
        [
            ind.rsi_period + 1,
            ind.macd_slow_period,
            ind.bollinger_period,
            ind.sma_short_period,
            ind.support_resistance_lookback,
            ind.volatility_window + 1,
            ind.volume_window,
        ]
        .into_iter()
        .min()
        .expect("window list is non-empty")
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        DEFAULT_ANALYSIS
    }
}

pub const DEFAULT_ANALYSIS: AnalysisConfig = AnalysisConfig {
    indicators: IndicatorSettings {
        rsi_period: 14,
        macd_fast_period: 12,
        macd_slow_period: 26,
        macd_signal_period: 9,
        bollinger_period: 20,
        bollinger_k: 2.0,
        sma_short_period: 20,
        sma_medium_period: 50,
        sma_long_period: 200,
        support_resistance_lookback: 30,
        volatility_window: 20,
        periods_per_year: 252.0,
        volume_window: 20,
        volume_spike_ratio: 2.0,
        volume_low_ratio: 0.7,
    },

    weights: ScoringWeights {
        technical: 0.35,
        sentiment: 0.25,
        momentum: 0.20,
        volatility: 0.10,
        volume: 0.10,
    },

    scoring: ScoringSettings {
        sentiment_combined_weight: 0.5,
        sentiment_news_weight: 0.3,
        sentiment_stock_weight: 0.2,
        momentum_24h_weight: 0.5,
        momentum_7d_weight: 0.3,
        momentum_30d_weight: 0.2,
        momentum_scale: 25.0,
        volatility_full_scale: 0.8,
        volume_elevated_ratio: 1.25,
    },

    signals: SignalSettings {
        support_proximity: 0.03,
        resistance_proximity: 0.05,
        pullback_dip_factor: 0.98,
        stop_loss_buffer: 1.02,
        stop_loss_discount: 0.98,
        divergence_threshold: 0.3,
        max_recommendations: 8,
    },

    decision: DecisionThresholds {
        buy_threshold: 0.15,
        sell_threshold: -0.15,
        very_high_confidence: 0.5,
        high_confidence: 0.3,
        medium_confidence: 0.15,
    },

    target: TargetSettings {
        base_scale: 0.12,
        volatility_scale: 0.08,
        volatility_ref: 0.6,
        max_move: 0.15,
    },

    risk: RiskCutoffs {
        medium_above: 0.35,
        high_above: 0.6,
    },

    horizon: HorizonSettings {
        short_term_volatility: 0.5,
        long_term_volatility: 0.3,
        strong_trend_momentum: 0.4,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = &DEFAULT_ANALYSIS.weights;
        let sum = w.technical + w.sentiment + w.momentum + w.volatility + w.volume;
        assert!((sum - 1.0).abs() < 1e-12, "weights must sum to 1, got {sum}");
    }

    #[test]
    fn test_min_bars_is_rsi_window() {
        // With the defaults, RSI has the smallest requirement: period + 1
        assert_eq!(DEFAULT_ANALYSIS.min_bars_for_any_indicator(), 15);
    }
}
