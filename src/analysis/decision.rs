//! Final classification: component scores in, one `TradingDecision` out.
//!
//! Single-pass and pure apart from the embedded decision timestamp. Identical
//! inputs always produce identical output fields, explanation text included.

use chrono::Utc;

use crate::config::AnalysisConfig;
use crate::models::{
    ComponentScores, Decision, DecisionConfidence, RiskLevel, TimeHorizon, TradingDecision,
};
use crate::utils::maths_utils::clamp_signed_unit;

/// Combine the component scores into a decision record.
///
/// `volatility` is the annualized return stddev from the indicator set; it
/// drives target width, risk level and time horizon. When unavailable the
/// target ignores it and the risk defaults to medium (thin history is itself
/// a risk signal).
pub fn make_decision(
    scores: ComponentScores,
    current_price: f64,
    volatility: Option<f64>,
    config: &AnalysisConfig,
) -> TradingDecision {
    let scores = scores.clamped();
    let overall = overall_score(&scores, config);

    let decision = classify(overall, config);
    let price_target = price_target(decision, overall, current_price, volatility, config);

    TradingDecision {
        decision,
        price_target,
        current_price,
        confidence: confidence(overall, config),
        overall_score: overall,
        component_scores: scores,
        explanation: explanation(decision, overall, &scores, config),
        risk_level: risk_level(volatility, config),
        time_horizon: time_horizon(volatility, scores.momentum, config),
        decision_timestamp: Utc::now(),
    }
}

/// Weighted sum of the clamped component scores. With weights summing to 1
/// the result is already inside [-1, 1]; the clamp guards odd test configs.
pub fn overall_score(scores: &ComponentScores, config: &AnalysisConfig) -> f64 {
    let w = &config.weights;
    clamp_signed_unit(
        scores.technical * w.technical
            + scores.sentiment * w.sentiment
            + scores.momentum * w.momentum
            + scores.volatility * w.volatility
            + scores.volume * w.volume,
    )
}

/// Inclusive thresholds: exactly the buy threshold is a BUY, exactly the sell
/// threshold a SELL.
fn classify(overall: f64, config: &AnalysisConfig) -> Decision {
    if overall >= config.decision.buy_threshold {
        Decision::Buy
    } else if overall <= config.decision.sell_threshold {
        Decision::Sell
    } else {
        Decision::Hold
    }
}

fn confidence(overall: f64, config: &AnalysisConfig) -> DecisionConfidence {
    let strength = overall.abs();
    let d = &config.decision;
    if strength >= d.very_high_confidence {
        DecisionConfidence::VeryHigh
    } else if strength >= d.high_confidence {
        DecisionConfidence::High
    } else if strength >= d.medium_confidence {
        DecisionConfidence::Medium
    } else {
        DecisionConfidence::Low
    }
}

/// HOLD keeps the current price (no directional target). BUY/SELL scale the
/// price by an implied move that grows with |overall|, widens with
/// volatility, and never exceeds the configured cap.
fn price_target(
    decision: Decision,
    overall: f64,
    current_price: f64,
    volatility: Option<f64>,
    config: &AnalysisConfig,
) -> f64 {
    let t = &config.target;

    let direction = match decision {
        Decision::Buy => 1.0,
        Decision::Sell => -1.0,
        Decision::Hold => return current_price,
    };

    let vol_widening = match volatility {
        Some(vol) => t.volatility_scale * (vol / t.volatility_ref).min(1.0),
        None => 0.0,
    };
    let implied_move = (overall.abs() * (t.base_scale + vol_widening)).min(t.max_move);

    current_price * (1.0 + direction * implied_move)
}

fn risk_level(volatility: Option<f64>, config: &AnalysisConfig) -> RiskLevel {
    match volatility {
        Some(vol) if vol > config.risk.high_above => RiskLevel::High,
        Some(vol) if vol > config.risk.medium_above => RiskLevel::Medium,
        Some(_) => RiskLevel::Low,
        // No volatility reading: do not pretend the position is calm
        None => RiskLevel::Medium,
    }
}

fn time_horizon(volatility: Option<f64>, momentum: f64, config: &AnalysisConfig) -> TimeHorizon {
    let h = &config.horizon;
    match volatility {
        Some(vol) if vol >= h.short_term_volatility => TimeHorizon::ShortTerm,
        Some(vol) if vol <= h.long_term_volatility && momentum.abs() >= h.strong_trend_momentum => {
            TimeHorizon::LongTerm
        }
        _ => TimeHorizon::MediumTerm,
    }
}

/// Deterministic explanation text: the decision, the overall score, and the
/// top components ranked by their absolute contribution to it.
fn explanation(
    decision: Decision,
    overall: f64,
    scores: &ComponentScores,
    config: &AnalysisConfig,
) -> String {
    let w = &config.weights;
    let mut ranked = [
        ("technical analysis", scores.technical, w.technical),
        ("market sentiment", scores.sentiment, w.sentiment),
        ("price momentum", scores.momentum, w.momentum),
        ("volatility conditions", scores.volatility, w.volatility),
        ("volume activity", scores.volume, w.volume),
    ];
    // Stable sort keeps the declaration order on ties, so identical inputs
    // always rank identically.
    ranked.sort_by(|a, b| {
        (b.1 * b.2)
            .abs()
            .partial_cmp(&(a.1 * a.2).abs())
            .expect("contributions are finite")
    });

    let clauses: Vec<String> = ranked
        .iter()
        .take(3)
        .filter(|(_, score, weight)| score * weight != 0.0)
        .map(|(name, score, _)| format!("{name} is {} ({score:+.2})", describe(*score)))
        .collect();

    let lead = match decision {
        Decision::Buy => format!("Buy signal with overall score {overall:.2}"),
        Decision::Sell => format!("Sell signal with overall score {overall:.2}"),
        Decision::Hold => format!("Hold recommendation with neutral score {overall:.2}"),
    };

    if clauses.is_empty() {
        format!("{lead}. All component scores are neutral.")
    } else {
        format!("{lead}: {}.", clauses.join("; "))
    }
}

fn describe(score: f64) -> &'static str {
    if score >= 0.6 {
        "strongly supportive"
    } else if score >= 0.25 {
        "moderately supportive"
    } else if score > 0.0 {
        "mildly supportive"
    } else if score <= -0.6 {
        "strongly negative"
    } else if score <= -0.25 {
        "moderately negative"
    } else {
        "mildly negative"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisConfig, DEFAULT_ANALYSIS, ScoringWeights};

    fn uniform(score: f64) -> ComponentScores {
        ComponentScores {
            technical: score,
            sentiment: score,
            momentum: score,
            volatility: score,
            volume: score,
        }
    }

    /// Weights concentrated on `technical` so boundary tests can dial in an
    /// exactly representable overall score.
    fn technical_only_config() -> AnalysisConfig {
        AnalysisConfig {
            weights: ScoringWeights {
                technical: 1.0,
                sentiment: 0.0,
                momentum: 0.0,
                volatility: 0.0,
                volume: 0.0,
            },
            ..DEFAULT_ANALYSIS
        }
    }

    fn technical(score: f64) -> ComponentScores {
        ComponentScores {
            technical: score,
            ..Default::default()
        }
    }

    #[test]
    fn test_boundary_classification() {
        let config = technical_only_config();

        let at_buy = make_decision(technical(0.15), 100.0, Some(0.2), &config);
        assert_eq!(at_buy.decision, Decision::Buy, "0.15 is inclusive BUY");
        assert_eq!(at_buy.confidence, DecisionConfidence::Medium);

        let below_buy = make_decision(technical(0.149999), 100.0, Some(0.2), &config);
        assert_eq!(below_buy.decision, Decision::Hold);
        assert_eq!(below_buy.confidence, DecisionConfidence::Low);

        let at_sell = make_decision(technical(-0.15), 100.0, Some(0.2), &config);
        assert_eq!(at_sell.decision, Decision::Sell, "-0.15 is inclusive SELL");

        let neutral = make_decision(technical(0.0), 100.0, Some(0.2), &config);
        assert_eq!(neutral.decision, Decision::Hold);
    }

    #[test]
    fn test_overall_is_weighted_sum_and_bounded() {
        let overall = overall_score(&uniform(1.0), &DEFAULT_ANALYSIS);
        assert!((overall - 1.0).abs() < 1e-12);
        assert!(overall <= 1.0);

        let overall = overall_score(&uniform(-1.0), &DEFAULT_ANALYSIS);
        assert!((overall + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overall_monotone_in_technical() {
        let mut previous = f64::NEG_INFINITY;
        for step in -10..=10 {
            let scores = ComponentScores {
                technical: step as f64 / 10.0,
                sentiment: 0.2,
                momentum: -0.1,
                volatility: 0.3,
                volume: 0.0,
            };
            let overall = overall_score(&scores, &DEFAULT_ANALYSIS);
            assert!(
                overall >= previous,
                "overall decreased when technical rose: {overall} < {previous}"
            );
            previous = overall;
        }
    }

    #[test]
    fn test_confidence_ladder() {
        let config = technical_only_config();
        let cases = [
            (0.55, DecisionConfidence::VeryHigh),
            (0.5, DecisionConfidence::VeryHigh),
            (0.35, DecisionConfidence::High),
            (0.2, DecisionConfidence::Medium),
            (0.1, DecisionConfidence::Low),
        ];
        for (score, expected) in cases {
            let decision = make_decision(technical(score), 100.0, Some(0.2), &config);
            assert_eq!(decision.confidence, expected, "score {score}");
        }
    }

    #[test]
    fn test_hold_target_is_current_price() {
        let decision = make_decision(uniform(0.0), 123.45, Some(0.2), &DEFAULT_ANALYSIS);
        assert_eq!(decision.decision, Decision::Hold);
        assert_eq!(decision.price_target, 123.45);
    }

    #[test]
    fn test_buy_target_above_price_and_capped() {
        let decision = make_decision(uniform(1.0), 100.0, Some(5.0), &DEFAULT_ANALYSIS);
        assert_eq!(decision.decision, Decision::Buy);
        assert!(decision.price_target > decision.current_price);
        // |overall| = 1, extreme volatility: the move must cap at 15%
        assert!((decision.price_target - 115.0).abs() < 1e-9);
    }

    #[test]
    fn test_sell_target_below_price() {
        let decision = make_decision(uniform(-0.4), 100.0, Some(0.2), &DEFAULT_ANALYSIS);
        assert_eq!(decision.decision, Decision::Sell);
        assert!(decision.price_target < 100.0);
        assert!(decision.price_target >= 85.0, "never below the 15% cap");
    }

    #[test]
    fn test_target_monotone_in_overall_strength() {
        let config = technical_only_config();
        let mut previous_target = 100.0;
        for step in 3..=10 {
            let score = step as f64 / 10.0; // 0.3 ..= 1.0, all BUYs
            let decision = make_decision(technical(score), 100.0, Some(0.2), &config);
            assert!(
                decision.price_target >= previous_target,
                "target shrank as conviction grew"
            );
            previous_target = decision.price_target;
        }
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(risk_level(Some(0.1), &DEFAULT_ANALYSIS), RiskLevel::Low);
        assert_eq!(risk_level(Some(0.4), &DEFAULT_ANALYSIS), RiskLevel::Medium);
        assert_eq!(risk_level(Some(0.7), &DEFAULT_ANALYSIS), RiskLevel::High);
        assert_eq!(risk_level(None, &DEFAULT_ANALYSIS), RiskLevel::Medium);
    }

    #[test]
    fn test_time_horizon_profiles() {
        // High volatility forces short term regardless of momentum
        assert_eq!(
            time_horizon(Some(0.6), 0.9, &DEFAULT_ANALYSIS),
            TimeHorizon::ShortTerm
        );
        // Calm market with a strong trend extends the horizon
        assert_eq!(
            time_horizon(Some(0.1), 0.6, &DEFAULT_ANALYSIS),
            TimeHorizon::LongTerm
        );
        assert_eq!(
            time_horizon(Some(0.1), -0.6, &DEFAULT_ANALYSIS),
            TimeHorizon::LongTerm
        );
        // Calm but trendless stays medium
        assert_eq!(
            time_horizon(Some(0.1), 0.1, &DEFAULT_ANALYSIS),
            TimeHorizon::MediumTerm
        );
        assert_eq!(time_horizon(None, 0.9, &DEFAULT_ANALYSIS), TimeHorizon::MediumTerm);
    }

    #[test]
    fn test_explanation_is_deterministic_and_ranked() {
        let scores = ComponentScores {
            technical: 0.62,
            sentiment: 0.25,
            momentum: 0.18,
            volatility: 0.05,
            volume: 0.0,
        };
        let first = make_decision(scores, 100.0, Some(0.2), &DEFAULT_ANALYSIS);
        let second = make_decision(scores, 100.0, Some(0.2), &DEFAULT_ANALYSIS);

        assert_eq!(first.explanation, second.explanation);
        assert!(first.explanation.starts_with("Buy signal"));
        // technical (0.62 * 0.35) outranks sentiment (0.25 * 0.25)
        let technical_at = first.explanation.find("technical analysis").unwrap();
        let sentiment_at = first.explanation.find("market sentiment").unwrap();
        assert!(technical_at < sentiment_at);
        assert!(first.explanation.contains("+0.62"));
    }

    #[test]
    fn test_explanation_all_neutral() {
        let decision = make_decision(uniform(0.0), 100.0, Some(0.2), &DEFAULT_ANALYSIS);
        assert!(decision.explanation.contains("All component scores are neutral"));
    }

    #[test]
    fn test_decision_identical_except_timestamp() {
        let scores = ComponentScores {
            technical: 0.4,
            sentiment: 0.2,
            momentum: 0.1,
            volatility: 0.5,
            volume: -0.2,
        };
        let first = make_decision(scores, 52.5, Some(0.3), &DEFAULT_ANALYSIS);
        let second = make_decision(scores, 52.5, Some(0.3), &DEFAULT_ANALYSIS);

        assert_eq!(first.decision, second.decision);
        assert_eq!(first.price_target, second.price_target);
        assert_eq!(first.confidence, second.confidence);
        assert_eq!(first.overall_score, second.overall_score);
        assert_eq!(first.component_scores, second.component_scores);
        assert_eq!(first.explanation, second.explanation);
        assert_eq!(first.risk_level, second.risk_level);
        assert_eq!(first.time_horizon, second.time_horizon);
    }
}
