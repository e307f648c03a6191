//! Reduction of indicators, sentiment and momentum into the five component
//! scores.
//!
//! Missing indicator readings are excluded and the remaining signals are
//! averaged (renormalization by exclusion). A missing sentiment snapshot is
//! different: it scores a neutral 0.0 and keeps its full weight in the
//! overall score, because the collaborator may supply sentiment later.

use crate::config::AnalysisConfig;
use crate::domain::{PriceChangeStats, SentimentSnapshot};
use crate::models::{ComponentScores, IndicatorSet, MaTrend};
use crate::utils::maths_utils::{clamp_signed_unit, mean};

/// Compute all five component scores, each clamped to [-1, 1].
pub fn component_scores(
    indicators: &IndicatorSet,
    sentiment: Option<&SentimentSnapshot>,
    changes: &PriceChangeStats,
    config: &AnalysisConfig,
) -> ComponentScores {
    ComponentScores {
        technical: technical_score(indicators),
        sentiment: sentiment_score(sentiment, config),
        momentum: momentum_score(changes, config),
        volatility: volatility_score(indicators.volatility, config),
        volume: volume_score(indicators, config),
    }
    .clamped()
}

/// Mean of the available per-indicator signals, each pre-mapped to [-1, 1].
fn technical_score(indicators: &IndicatorSet) -> f64 {
    let signals: Vec<f64> = [
        indicators.rsi.map(rsi_signal),
        indicators.macd_histogram.map(macd_signal),
        indicators.ma_trend.map(trend_signal),
        indicators
            .bollinger
            .map(|bands| bollinger_signal(bands.price_position)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if signals.is_empty() {
        return 0.0;
    }
    mean(&signals)
}

/// Oversold is bullish, overbought is bearish; 40-60 is neutral ground.
fn rsi_signal(rsi: f64) -> f64 {
    if rsi < 30.0 {
        0.8
    } else if rsi < 40.0 {
        0.4
    } else if rsi > 70.0 {
        -0.8
    } else if rsi > 60.0 {
        -0.4
    } else {
        0.0
    }
}

/// Histogram sign: line above its signal EMA is bullish.
fn macd_signal(histogram: f64) -> f64 {
    if histogram > 0.0 {
        0.6
    } else if histogram < 0.0 {
        -0.6
    } else {
        0.0
    }
}

fn trend_signal(trend: MaTrend) -> f64 {
    match trend {
        MaTrend::StrongUptrend => 0.8,
        MaTrend::Uptrend => 0.4,
        MaTrend::Sideways => 0.0,
        MaTrend::Downtrend => -0.4,
        MaTrend::StrongDowntrend => -0.8,
    }
}

/// Position within the bands: at or below the lower band is bullish, at or
/// above the upper band bearish, the middle neutral.
fn bollinger_signal(price_position: f64) -> f64 {
    if price_position <= 0.0 {
        0.6
    } else if price_position >= 1.0 {
        -0.6
    } else if price_position < 0.5 {
        0.3
    } else if price_position > 0.5 {
        -0.3
    } else {
        0.0
    }
}

/// Confidence-weighted blend of the snapshot's scores; neutral 0.0 when the
/// snapshot is absent.
fn sentiment_score(sentiment: Option<&SentimentSnapshot>, config: &AnalysisConfig) -> f64 {
    let Some(snapshot) = sentiment else {
        return 0.0;
    };
    let s = &config.scoring;

    let combined = snapshot.combined_score.clamp(-1.0, 1.0);
    let news = snapshot.news_score.clamp(-1.0, 1.0) * snapshot.news_confidence.clamp(0.0, 1.0);
    let stock = snapshot.stock_score.clamp(-1.0, 1.0);

    clamp_signed_unit(
        combined * s.sentiment_combined_weight
            + news * s.sentiment_news_weight
            + stock * s.sentiment_stock_weight,
    )
}

/// Saturating momentum from the blended 24h/7d/30d changes. Windows without
/// an anchor are excluded and the remaining weights renormalized; with no
/// window at all the score is neutral.
fn momentum_score(changes: &PriceChangeStats, config: &AnalysisConfig) -> f64 {
    let s = &config.scoring;
    let weighted: Vec<(f64, f64)> = [
        (changes.change_24h, s.momentum_24h_weight),
        (changes.change_7d, s.momentum_7d_weight),
        (changes.change_30d, s.momentum_30d_weight),
    ]
    .into_iter()
    .filter_map(|(change, weight)| Some((change?, weight)))
    .collect();

    let total_weight: f64 = weighted.iter().map(|(_, w)| w).sum();
    if total_weight == 0.0 {
        return 0.0;
    }

    let blended: f64 = weighted
        .iter()
        .map(|(change, weight)| change * weight)
        .sum::<f64>()
        / total_weight;

    (blended * s.momentum_scale).tanh()
}

/// Calm-is-supportive convention: +1 at zero volatility, crossing zero at
/// half the full scale, -1 at and beyond the full scale. Unavailable
/// volatility is neutral.
fn volatility_score(volatility: Option<f64>, config: &AnalysisConfig) -> f64 {
    let Some(vol) = volatility else {
        return 0.0;
    };
    let full_scale = config.scoring.volatility_full_scale;
    clamp_signed_unit(1.0 - 2.0 * (vol / full_scale).min(1.0))
}

/// Elevated volume signed by the prevailing trend (a surge confirms whichever
/// direction price is already moving); thin volume is a mild negative
/// regardless of direction.
fn volume_score(indicators: &IndicatorSet, config: &AnalysisConfig) -> f64 {
    let Some(ratio) = indicators.volume_anomaly_ratio else {
        return 0.0;
    };
    let ind = &config.indicators;

    if ratio <= ind.volume_low_ratio {
        return -0.3;
    }

    let magnitude = if ratio >= ind.volume_spike_ratio {
        0.7
    } else if ratio >= config.scoring.volume_elevated_ratio {
        0.4
    } else {
        return 0.0;
    };

    let direction = match indicators.ma_trend {
        Some(trend) if trend.is_bullish() => 1.0,
        Some(trend) if trend.is_bearish() => -1.0,
        _ => 0.0,
    };

    magnitude * direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ANALYSIS;
    use crate::domain::SentimentLabel;
    use crate::models::BollingerBands;

    fn snapshot(combined: f64, news: f64, news_confidence: f64, stock: f64) -> SentimentSnapshot {
        SentimentSnapshot {
            news_score: news,
            news_confidence,
            stock_score: stock,
            combined_score: combined,
            label: if combined > 0.0 {
                SentimentLabel::Bullish
            } else if combined < 0.0 {
                SentimentLabel::Bearish
            } else {
                SentimentLabel::Neutral
            },
        }
    }

    #[test]
    fn test_missing_sentiment_is_neutral() {
        assert_eq!(sentiment_score(None, &DEFAULT_ANALYSIS), 0.0);
    }

    #[test]
    fn test_sentiment_blend() {
        let snap = snapshot(0.4, 0.5, 0.8, 0.2);
        let score = sentiment_score(Some(&snap), &DEFAULT_ANALYSIS);
        // 0.4 * 0.5 + (0.5 * 0.8) * 0.3 + 0.2 * 0.2
        assert!((score - 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_sentiment_clamps_rogue_inputs() {
        let snap = snapshot(3.0, 2.0, 5.0, 2.0);
        let score = sentiment_score(Some(&snap), &DEFAULT_ANALYSIS);
        assert!(score <= 1.0, "blend must clamp, got {score}");
    }

    #[test]
    fn test_technical_renormalizes_over_available_signals() {
        // Only RSI available: the mean is taken over one signal, not four
        let set = IndicatorSet {
            rsi: Some(25.0),
            ..Default::default()
        };
        assert_eq!(technical_score(&set), 0.8);
    }

    #[test]
    fn test_technical_mean_of_mixed_signals() {
        let set = IndicatorSet {
            rsi: Some(65.0),                 // -0.4
            macd_histogram: Some(1.2),       // +0.6
            ma_trend: Some(MaTrend::StrongUptrend), // +0.8
            bollinger: Some(BollingerBands {
                upper: 110.0,
                middle: 100.0,
                lower: 90.0,
                bandwidth: 0.2,
                price_position: 0.9, // -0.3
            }),
            ..Default::default()
        };
        assert!((technical_score(&set) - 0.175).abs() < 1e-12);
    }

    #[test]
    fn test_momentum_sign_and_saturation() {
        let up = PriceChangeStats {
            change_24h: Some(0.05),
            change_7d: Some(0.10),
            change_30d: Some(0.20),
        };
        let score = momentum_score(&up, &DEFAULT_ANALYSIS);
        assert!(score > 0.9, "large blended move should saturate, got {score}");

        let down = PriceChangeStats {
            change_24h: Some(-0.05),
            change_7d: Some(-0.10),
            change_30d: Some(-0.20),
        };
        assert!(momentum_score(&down, &DEFAULT_ANALYSIS) < -0.9);
    }

    #[test]
    fn test_momentum_renormalizes_missing_windows() {
        let only_24h = PriceChangeStats {
            change_24h: Some(0.02),
            change_7d: None,
            change_30d: None,
        };
        let score = momentum_score(&only_24h, &DEFAULT_ANALYSIS);
        // Renormalized to full weight: tanh(25 * 0.02)
        assert!((score - (0.5_f64).tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_momentum_empty_is_neutral() {
        assert_eq!(momentum_score(&PriceChangeStats::default(), &DEFAULT_ANALYSIS), 0.0);
    }

    #[test]
    fn test_volatility_score_convention() {
        assert_eq!(volatility_score(Some(0.0), &DEFAULT_ANALYSIS), 1.0);
        assert!((volatility_score(Some(0.4), &DEFAULT_ANALYSIS)).abs() < 1e-12);
        assert_eq!(volatility_score(Some(0.8), &DEFAULT_ANALYSIS), -1.0);
        assert_eq!(volatility_score(Some(5.0), &DEFAULT_ANALYSIS), -1.0);
        assert_eq!(volatility_score(None, &DEFAULT_ANALYSIS), 0.0);
    }

    #[test]
    fn test_volume_spike_follows_trend() {
        let bullish = IndicatorSet {
            volume_anomaly_ratio: Some(2.5),
            ma_trend: Some(MaTrend::Uptrend),
            ..Default::default()
        };
        assert_eq!(volume_score(&bullish, &DEFAULT_ANALYSIS), 0.7);

        let bearish = IndicatorSet {
            volume_anomaly_ratio: Some(2.5),
            ma_trend: Some(MaTrend::StrongDowntrend),
            ..Default::default()
        };
        assert_eq!(volume_score(&bearish, &DEFAULT_ANALYSIS), -0.7);

        let directionless = IndicatorSet {
            volume_anomaly_ratio: Some(2.5),
            ..Default::default()
        };
        assert_eq!(volume_score(&directionless, &DEFAULT_ANALYSIS), 0.0);
    }

    #[test]
    fn test_low_volume_is_mildly_negative() {
        let thin = IndicatorSet {
            volume_anomaly_ratio: Some(0.5),
            ma_trend: Some(MaTrend::Uptrend),
            ..Default::default()
        };
        assert_eq!(volume_score(&thin, &DEFAULT_ANALYSIS), -0.3);
    }

    #[test]
    fn test_all_component_scores_bounded() {
        let set = IndicatorSet {
            rsi: Some(5.0),
            macd_histogram: Some(10.0),
            ma_trend: Some(MaTrend::StrongUptrend),
            volatility: Some(0.05),
            volume_anomaly_ratio: Some(9.0),
            ..Default::default()
        };
        let snap = snapshot(1.0, 1.0, 1.0, 1.0);
        let changes = PriceChangeStats {
            change_24h: Some(0.5),
            change_7d: Some(0.5),
            change_30d: Some(0.5),
        };
        let scores = component_scores(&set, Some(&snap), &changes, &DEFAULT_ANALYSIS);

        for (name, value) in [
            ("technical", scores.technical),
            ("sentiment", scores.sentiment),
            ("momentum", scores.momentum),
            ("volatility", scores.volatility),
            ("volume", scores.volume),
        ] {
            assert!(
                (-1.0..=1.0).contains(&value),
                "{name} out of range: {value}"
            );
        }
    }
}
