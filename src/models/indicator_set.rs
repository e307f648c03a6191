use serde::Serialize;
use strum_macros::Display;

/// Direction of a MACD histogram sign change on the latest bar.
#[derive(Serialize, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MacdCrossover {
    Bullish,
    Bearish,
}

/// Moving-average trend taxonomy. The strong variants require the full
/// price > SMA20 > SMA50 > SMA200 ordering (or its mirror), which in turn
/// requires SMA200 history.
#[derive(Serialize, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MaTrend {
    StrongUptrend,
    Uptrend,
    Sideways,
    Downtrend,
    StrongDowntrend,
}

impl MaTrend {
    pub fn is_bullish(&self) -> bool {
        matches!(self, MaTrend::StrongUptrend | MaTrend::Uptrend)
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, MaTrend::StrongDowntrend | MaTrend::Downtrend)
    }
}

/// Bollinger Bands reading for the latest bar.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    /// (upper - lower) / middle; 0.0 when the middle band is zero.
    pub bandwidth: f64,
    /// Close position within the bands, clamped to [0, 1]; 0.5 when the bands
    /// have collapsed (upper == lower).
    pub price_position: f64,
}

/// All indicator readings derived once from a validated series.
///
/// Each field is independently `None` when its window exceeds the available
/// history. Consumers renormalize over what is present; they never substitute
/// zero for a missing reading.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorSet {
    /// Wilder RSI in [0, 100].
    pub rsi: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    /// Set only when the histogram changed sign on the latest bar.
    pub macd_crossover: Option<MacdCrossover>,
    pub bollinger: Option<BollingerBands>,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub ma_trend: Option<MaTrend>,
    /// Minimum low over the support/resistance lookback.
    pub support: Option<f64>,
    /// Maximum high over the support/resistance lookback.
    pub resistance: Option<f64>,
    /// Annualized standard deviation of simple returns.
    pub volatility: Option<f64>,
    /// Latest volume over its rolling average; 1.0 when the average is zero.
    pub volume_anomaly_ratio: Option<f64>,
}

impl IndicatorSet {
    /// True when no indicator could be computed at all, which aborts the
    /// request with `InsufficientData`.
    pub fn is_unavailable(&self) -> bool {
        self.rsi.is_none()
            && self.macd_line.is_none()
            && self.macd_signal.is_none()
            && self.macd_histogram.is_none()
            && self.macd_crossover.is_none()
            && self.bollinger.is_none()
            && self.sma_20.is_none()
            && self.sma_50.is_none()
            && self.sma_200.is_none()
            && self.ma_trend.is_none()
            && self.support.is_none()
            && self.resistance.is_none()
            && self.volatility.is_none()
            && self.volume_anomaly_ratio.is_none()
    }

    pub fn has_volume_spike(&self, spike_ratio: f64) -> bool {
        self.volume_anomaly_ratio
            .is_some_and(|ratio| ratio >= spike_ratio)
    }

    pub fn has_low_volume(&self, low_ratio: f64) -> bool {
        self.volume_anomaly_ratio
            .is_some_and(|ratio| ratio <= low_ratio)
    }
}
