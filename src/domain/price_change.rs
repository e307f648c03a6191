use chrono::Duration;

use crate::domain::candle::CandleSeries;

/// Fractional close-to-close changes over trailing calendar windows, measured
/// back from the latest bar's timestamp.
///
/// A window is `None` when no bar is old enough to anchor it, or when the
/// anchor close is zero (no meaningful ratio). Fractions, not percent:
/// +0.05 is a 5% rise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceChangeStats {
    pub change_24h: Option<f64>,
    pub change_7d: Option<f64>,
    pub change_30d: Option<f64>,
}

impl PriceChangeStats {
    /// Derive the three windows from the series itself. Callers with their own
    /// notion of "24h ago" (e.g. exchange sessions) can build the struct
    /// directly instead.
    pub fn from_series(series: &CandleSeries) -> Self {
        PriceChangeStats {
            change_24h: change_over(series, Duration::hours(24)),
            change_7d: change_over(series, Duration::days(7)),
            change_30d: change_over(series, Duration::days(30)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.change_24h.is_none() && self.change_7d.is_none() && self.change_30d.is_none()
    }
}

/// Change from the last bar at or before `lookback` ago to the latest bar.
fn change_over(series: &CandleSeries, lookback: Duration) -> Option<f64> {
    let cutoff = series.latest_timestamp() - lookback;

    // Walk backwards to the newest bar old enough to anchor the window.
    let anchor_idx = series.timestamps().iter().rposition(|&ts| ts <= cutoff)?;
    let anchor_close = series.close_prices()[anchor_idx];
    if anchor_close <= 0.0 {
        return None;
    }

    Some((series.latest_close() - anchor_close) / anchor_close)
}
