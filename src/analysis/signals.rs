//! Human-readable trading recommendations derived from the indicator set and
//! sentiment.
//!
//! Each recommendation family can fire at most once, so the output is
//! deduplicated by construction. Confidence is driven purely by how many
//! independent indicators corroborate the setup. An empty list is a valid
//! result ("insufficient signal"), not an error.

use crate::config::AnalysisConfig;
use crate::domain::SentimentSnapshot;
use crate::models::{IndicatorSet, MacdCrossover, MaTrend, Recommendation, RecommendationKind, SignalConfidence};

/// Generate the recommendation list: unique kinds, most confident first,
/// capped by configuration.
pub fn recommendations(
    indicators: &IndicatorSet,
    sentiment: Option<&SentimentSnapshot>,
    current_price: f64,
    config: &AnalysisConfig,
) -> Vec<Recommendation> {
    let ctx = SignalContext {
        indicators,
        sentiment_score: sentiment.map(|s| s.combined_score).unwrap_or(0.0),
        sentiment_present: sentiment.is_some(),
        current_price,
        config,
    };

    let mut recs: Vec<Recommendation> = [
        ctx.pullback_buy(),
        ctx.oversold_bounce(),
        ctx.breakout_setup(),
        ctx.stop_loss_placement(),
        ctx.overbought_warning(),
        ctx.downtrend_confirmation(),
        ctx.volume_spike(),
        ctx.low_volume(),
        ctx.sentiment_divergence(),
    ]
    .into_iter()
    .flatten()
    .collect();

    // Stable sort: equal confidence keeps the family order above
    recs.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    recs.truncate(config.signals.max_recommendations);

    log::debug!(
        "generated {} recommendations: {:?}",
        recs.len(),
        recs.iter().map(|r| r.kind).collect::<Vec<_>>()
    );

    recs
}

/// Everything a single family check needs, so each check reads as one
/// condition plus a corroborator count.
struct SignalContext<'a> {
    indicators: &'a IndicatorSet,
    sentiment_score: f64,
    sentiment_present: bool,
    current_price: f64,
    config: &'a AnalysisConfig,
}

fn confidence_from(corroborators: &[bool]) -> SignalConfidence {
    SignalConfidence::from_corroboration(corroborators.iter().filter(|&&c| c).count())
}

impl SignalContext<'_> {
    fn trend(&self) -> Option<MaTrend> {
        self.indicators.ma_trend
    }

    fn trend_is_bullish(&self) -> bool {
        self.trend().is_some_and(|t| t.is_bullish())
    }

    fn trend_is_bearish(&self) -> bool {
        self.trend().is_some_and(|t| t.is_bearish())
    }

    fn macd_is_bullish(&self) -> bool {
        self.indicators.macd_histogram.is_some_and(|h| h > 0.0)
    }

    fn macd_is_bearish(&self) -> bool {
        self.indicators.macd_histogram.is_some_and(|h| h < 0.0)
    }

    fn rsi(&self) -> Option<f64> {
        self.indicators.rsi
    }

    fn band_position(&self) -> Option<f64> {
        self.indicators.bollinger.map(|b| b.price_position)
    }

    /// Price sitting just above support, or dipping below SMA20 inside an
    /// uptrend: a buy-the-dip setup.
    fn pullback_buy(&self) -> Option<Recommendation> {
        let support = self.indicators.support?;
        let s = &self.config.signals;

        let near_support = support > 0.0
            && self.current_price >= support
            && (self.current_price - support) / support <= s.support_proximity;
        let uptrend_dip = self.trend_is_bullish()
            && self
                .indicators
                .sma_20
                .is_some_and(|sma| self.current_price < sma * s.pullback_dip_factor);

        if !(near_support || uptrend_dip) {
            return None;
        }

        let confidence = confidence_from(&[
            self.trend_is_bullish(),
            self.macd_is_bullish(),
            self.rsi().is_some_and(|rsi| rsi < 40.0),
            self.sentiment_score > 0.2,
        ]);
        Some(Recommendation::new(
            RecommendationKind::PullbackBuy,
            format!("Consider buying opportunities on pullbacks near ${support:.2}"),
            confidence,
        ))
    }

    /// Deep RSI oversold while sentiment is not actively negative.
    fn oversold_bounce(&self) -> Option<Recommendation> {
        let rsi = self.rsi()?;
        if rsi >= 30.0 || self.sentiment_score < 0.0 {
            return None;
        }

        let confidence = confidence_from(&[
            true, // the RSI reading itself
            self.band_position().is_some_and(|p| p <= 0.1),
            self.sentiment_score > 0.0,
        ]);
        Some(Recommendation::new(
            RecommendationKind::OversoldBounce,
            format!("Oversold conditions (RSI: {rsi:.1}) - potential bounce opportunity"),
            confidence,
        ))
    }

    /// Price pressing into resistance on a volume surge.
    fn breakout_setup(&self) -> Option<Recommendation> {
        let resistance = self.indicators.resistance?;
        let s = &self.config.signals;

        let near_resistance = self.current_price < resistance
            && self.current_price > 0.0
            && (resistance - self.current_price) / self.current_price <= s.resistance_proximity;
        let spike = self
            .indicators
            .has_volume_spike(self.config.indicators.volume_spike_ratio);

        if !(near_resistance && spike) {
            return None;
        }

        let confidence = confidence_from(&[
            true, // near resistance with the surge
            self.macd_is_bullish(),
            self.rsi().is_some_and(|rsi| rsi > 50.0),
            matches!(self.indicators.macd_crossover, Some(MacdCrossover::Bullish)),
        ]);
        Some(Recommendation::new(
            RecommendationKind::BreakoutSetup,
            format!("Monitor for breakout above resistance level at ${resistance:.2}"),
            confidence,
        ))
    }

    /// Price comfortably above support: suggest where the stop belongs.
    fn stop_loss_placement(&self) -> Option<Recommendation> {
        let support = self.indicators.support?;
        let s = &self.config.signals;
        if self.current_price <= support * s.stop_loss_buffer {
            return None;
        }

        let stop = support * s.stop_loss_discount;
        let confidence = confidence_from(&[
            true, // a support level to anchor the stop
            self.trend_is_bullish(),
            self.rsi().is_some_and(|rsi| rsi > 50.0),
        ]);
        Some(Recommendation::new(
            RecommendationKind::StopLossPlacement,
            format!("Consider stop-loss orders near ${stop:.2} to manage risk"),
            confidence,
        ))
    }

    /// RSI overbought with weakening internals.
    fn overbought_warning(&self) -> Option<Recommendation> {
        let rsi = self.rsi()?;
        if rsi <= 70.0 {
            return None;
        }

        let confidence = confidence_from(&[
            true, // the RSI reading itself
            self.band_position().is_some_and(|p| p >= 1.0),
            self.macd_is_bearish(),
            matches!(self.indicators.macd_crossover, Some(MacdCrossover::Bearish)),
        ]);
        Some(Recommendation::new(
            RecommendationKind::OverboughtWarning,
            format!("Overbought conditions detected (RSI: {rsi:.1}) - potential pullback ahead"),
            confidence,
        ))
    }

    /// Multiple bearish indicators lining up behind a confirmed downtrend.
    fn downtrend_confirmation(&self) -> Option<Recommendation> {
        if self.trend() != Some(MaTrend::StrongDowntrend) {
            return None;
        }
        let macd_bearish = self.macd_is_bearish();
        let sentiment_bearish = self.sentiment_score < -0.1;
        if !(macd_bearish || sentiment_bearish) {
            return None;
        }

        let confidence = confidence_from(&[
            true, // the stacked downtrend
            macd_bearish,
            sentiment_bearish,
            self.rsi().is_some_and(|rsi| rsi < 40.0),
        ]);
        Some(Recommendation::new(
            RecommendationKind::DowntrendConfirmation,
            "Downtrend confirmed - consider defensive positions or waiting for reversal signals"
                .to_string(),
            confidence,
        ))
    }

    /// Unusual volume, worded by the direction it confirms.
    fn volume_spike(&self) -> Option<Recommendation> {
        if !self
            .indicators
            .has_volume_spike(self.config.indicators.volume_spike_ratio)
        {
            return None;
        }

        let message = if self.trend_is_bullish() || self.macd_is_bullish() {
            "Strong volume surge confirms buying interest"
        } else if self.trend_is_bearish() || self.macd_is_bearish() {
            "Heavy volume confirms selling pressure"
        } else {
            "Unusual volume activity - watch for a directional move"
        };

        let aligned_bullish = self.trend_is_bullish() && self.macd_is_bullish();
        let aligned_bearish = self.trend_is_bearish() && self.macd_is_bearish();
        let confidence = confidence_from(&[
            true, // the spike itself
            self.trend().is_some(),
            aligned_bullish || aligned_bearish,
        ]);
        Some(Recommendation::new(
            RecommendationKind::VolumeSpike,
            message.to_string(),
            confidence,
        ))
    }

    /// Participation so thin that other signals deserve less weight.
    fn low_volume(&self) -> Option<Recommendation> {
        if !self
            .indicators
            .has_low_volume(self.config.indicators.volume_low_ratio)
        {
            return None;
        }
        Some(Recommendation::new(
            RecommendationKind::LowVolume,
            "Volume running well below average - treat other signals with caution".to_string(),
            confidence_from(&[true]),
        ))
    }

    /// Sentiment and the technical trend disagreeing in sign.
    fn sentiment_divergence(&self) -> Option<Recommendation> {
        if !self.sentiment_present {
            return None;
        }
        let threshold = self.config.signals.divergence_threshold;

        let bullish_divergence = self.sentiment_score > threshold && self.trend_is_bearish();
        let bearish_divergence = self.sentiment_score < -threshold && self.trend_is_bullish();

        let message = if bullish_divergence {
            "Positive sentiment despite downtrend - potential reversal setup developing"
        } else if bearish_divergence {
            "Negative sentiment despite uptrend - rally may lack support"
        } else {
            return None;
        };

        Some(Recommendation::new(
            RecommendationKind::SentimentDivergence,
            message.to_string(),
            confidence_from(&[true, true]),
        ))
    }
}
