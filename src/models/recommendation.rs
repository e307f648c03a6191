use serde::Serialize;
use strum_macros::Display;

/// Confidence attached to a single recommendation, driven by how many
/// independent indicators corroborate it. Ordered so that sorting descending
/// puts the most confident first.
#[derive(Serialize, Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SignalConfidence {
    Low,
    Medium,
    High,
}

impl SignalConfidence {
    /// >= 3 agreeing indicators => high, 2 => medium, otherwise low.
    pub fn from_corroboration(agreeing_indicators: usize) -> Self {
        match agreeing_indicators {
            n if n >= 3 => SignalConfidence::High,
            2 => SignalConfidence::Medium,
            _ => SignalConfidence::Low,
        }
    }
}

/// Icon tag forwarded to the UI alongside each recommendation.
#[derive(Serialize, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IconTag {
    CheckCircle,
    Lightbulb,
    AlertTriangle,
}

/// Closed set of recommendation families. Kept as an enum (not strings) so a
/// new family cannot be added without every match arm being revisited.
#[derive(Serialize, Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecommendationKind {
    PullbackBuy,
    OversoldBounce,
    BreakoutSetup,
    StopLossPlacement,
    OverboughtWarning,
    DowntrendConfirmation,
    VolumeSpike,
    LowVolume,
    SentimentDivergence,
}

impl RecommendationKind {
    pub fn icon(&self) -> IconTag {
        match self {
            RecommendationKind::PullbackBuy
            | RecommendationKind::OversoldBounce
            | RecommendationKind::VolumeSpike => IconTag::CheckCircle,
            RecommendationKind::BreakoutSetup
            | RecommendationKind::DowntrendConfirmation
            | RecommendationKind::LowVolume
            | RecommendationKind::SentimentDivergence => IconTag::Lightbulb,
            RecommendationKind::StopLossPlacement | RecommendationKind::OverboughtWarning => {
                IconTag::AlertTriangle
            }
        }
    }
}

/// One human-readable recommendation. Serialized field names match the
/// boundary contract: the kind goes out as `type`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub icon: IconTag,
    pub message: String,
    pub confidence: SignalConfidence,
}

impl Recommendation {
    pub fn new(kind: RecommendationKind, message: String, confidence: SignalConfidence) -> Self {
        Recommendation {
            kind,
            icon: kind.icon(),
            message,
            confidence,
        }
    }
}
