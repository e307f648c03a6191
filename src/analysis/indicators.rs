//! Technical indicator computation over a validated candle series.
//!
//! Every indicator is windowed. If the series is shorter than an indicator's
//! window, that reading is `None` rather than approximated; the scoring stage
//! renormalizes over whatever is present.

use itertools::Itertools;

use crate::config::AnalysisConfig;
use crate::domain::CandleSeries;
use crate::models::{BollingerBands, IndicatorSet, MaTrend, MacdCrossover};
use crate::utils::maths_utils::{
    clamp_unit, ema_series, get_max, get_min, mean, population_std_dev, sample_std_dev,
};

/// Derive the full indicator set for one series. Pure; called once per
/// analysis request.
pub fn compute_indicators(series: &CandleSeries, config: &AnalysisConfig) -> IndicatorSet {
    let ind = &config.indicators;
    let closes = series.close_prices();
    let current_price = series.latest_close();

    let (macd_line, macd_signal, macd_histogram, macd_crossover) = macd(
        closes,
        ind.macd_fast_period,
        ind.macd_slow_period,
        ind.macd_signal_period,
    );

    let sma_20 = sma(closes, ind.sma_short_period);
    let sma_50 = sma(closes, ind.sma_medium_period);
    let sma_200 = sma(closes, ind.sma_long_period);
    let ma_trend = classify_trend(current_price, sma_20, sma_50, sma_200);

    let set = IndicatorSet {
        rsi: wilder_rsi(closes, ind.rsi_period),
        macd_line,
        macd_signal,
        macd_histogram,
        macd_crossover,
        bollinger: bollinger_bands(closes, ind.bollinger_period, ind.bollinger_k),
        sma_20,
        sma_50,
        sma_200,
        ma_trend,
        support: trailing_min(series.low_prices(), ind.support_resistance_lookback),
        resistance: trailing_max(series.high_prices(), ind.support_resistance_lookback),
        volatility: return_volatility(closes, ind.volatility_window, ind.periods_per_year),
        volume_anomaly_ratio: volume_anomaly_ratio(series.volumes(), ind.volume_window),
    };

    log::debug!(
        "indicators for {} bars: rsi={:?} trend={:?} volatility={:?}",
        series.len(),
        set.rsi,
        set.ma_trend,
        set.volatility
    );

    set
}

/// Wilder-smoothed RSI in [0, 100]. Needs `period + 1` closes. An all-gain
/// window (average loss zero) pins the value at 100 instead of dividing by
/// zero.
fn wilder_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let deltas: Vec<f64> = closes.iter().tuple_windows().map(|(a, b)| b - a).collect();

    // Seed with the simple mean of the first `period` deltas, then apply
    // Wilder smoothing across the rest of the history.
    let mut avg_gain = mean(
        &deltas[..period]
            .iter()
            .map(|&d| d.max(0.0))
            .collect::<Vec<_>>(),
    );
    let mut avg_loss = mean(
        &deltas[..period]
            .iter()
            .map(|&d| (-d).max(0.0))
            .collect::<Vec<_>>(),
    );

    for &delta in &deltas[period..] {
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// MACD line, signal, histogram and latest-bar crossover. Each part becomes
/// available as its own window is covered: the line from `slow` bars, the
/// signal from `slow + signal - 1`, a crossover one bar after that.
#[allow(clippy::type_complexity)]
fn macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> (Option<f64>, Option<f64>, Option<f64>, Option<MacdCrossover>) {
    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);

    // Defined from index slow - 1 onwards
    let macd_values: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .filter_map(|(f, s)| Some(f.as_ref()? - s.as_ref()?))
        .collect();

    let Some(&line) = macd_values.last() else {
        return (None, None, None, None);
    };

    let signal_series = ema_series(&macd_values, signal);
    let Some(signal_value) = signal_series.last().copied().flatten() else {
        return (Some(line), None, None, None);
    };

    let histogram = line - signal_value;

    // Histogram history where the signal is defined; the crossover compares
    // the last two entries.
    let histogram_series: Vec<f64> = macd_values
        .iter()
        .zip(signal_series.iter())
        .filter_map(|(m, s)| Some(m - s.as_ref()?))
        .collect();

    let crossover = match histogram_series.as_slice() {
        [.., previous, latest] if *previous <= 0.0 && *latest > 0.0 => Some(MacdCrossover::Bullish),
        [.., previous, latest] if *previous >= 0.0 && *latest < 0.0 => Some(MacdCrossover::Bearish),
        _ => None,
    };

    (Some(line), Some(signal_value), Some(histogram), crossover)
}

/// Bollinger Bands over the trailing window, k standard deviations wide.
/// Degenerate cases are pinned: collapsed bands put the price position at
/// 0.5, a zero middle band yields zero bandwidth.
fn bollinger_bands(closes: &[f64], period: usize, k: f64) -> Option<BollingerBands> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let middle = mean(window);
    let std_dev = population_std_dev(window);

    let upper = middle + k * std_dev;
    let lower = middle - k * std_dev;
    let current = *closes.last().expect("window is non-empty");

    let price_position = if upper == lower {
        0.5
    } else {
        clamp_unit((current - lower) / (upper - lower))
    };
    let bandwidth = if middle == 0.0 {
        0.0
    } else {
        (upper - lower) / middle
    };

    Some(BollingerBands {
        upper,
        middle,
        lower,
        bandwidth,
        price_position,
    })
}

fn sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    Some(mean(&closes[closes.len() - period..]))
}

/// Moving-average trend. Needs the short and medium averages; the strong
/// variants additionally need the long one with the full stacked ordering.
fn classify_trend(
    current_price: f64,
    sma_20: Option<f64>,
    sma_50: Option<f64>,
    sma_200: Option<f64>,
) -> Option<MaTrend> {
    let (s20, s50) = (sma_20?, sma_50?);

    if let Some(s200) = sma_200 {
        if current_price > s20 && s20 > s50 && s50 > s200 {
            return Some(MaTrend::StrongUptrend);
        }
        if current_price < s20 && s20 < s50 && s50 < s200 {
            return Some(MaTrend::StrongDowntrend);
        }
    }

    if current_price > s20 {
        Some(MaTrend::Uptrend)
    } else if current_price < s20 {
        Some(MaTrend::Downtrend)
    } else {
        Some(MaTrend::Sideways)
    }
}

fn trailing_min(values: &[f64], lookback: usize) -> Option<f64> {
    if lookback == 0 || values.len() < lookback {
        return None;
    }
    Some(get_min(&values[values.len() - lookback..]))
}

fn trailing_max(values: &[f64], lookback: usize) -> Option<f64> {
    if lookback == 0 || values.len() < lookback {
        return None;
    }
    Some(get_max(&values[values.len() - lookback..]))
}

/// Annualized standard deviation of simple returns over the trailing window.
/// A zero previous close contributes a zero return rather than a division.
fn return_volatility(closes: &[f64], window: usize, periods_per_year: f64) -> Option<f64> {
    if window < 2 || closes.len() < window + 1 {
        return None;
    }

    let tail = &closes[closes.len() - (window + 1)..];
    let returns: Vec<f64> = tail
        .iter()
        .tuple_windows()
        .map(|(prev, next)| if *prev > 0.0 { next / prev - 1.0 } else { 0.0 })
        .collect();

    Some(sample_std_dev(&returns) * periods_per_year.sqrt())
}

/// Latest volume over its rolling average (window includes the latest bar).
/// A zero average pins the ratio at the neutral 1.0.
fn volume_anomaly_ratio(volumes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || volumes.len() < window {
        return None;
    }

    let average = mean(&volumes[volumes.len() - window..]);
    let latest = *volumes.last().expect("window is non-empty");

    if average == 0.0 {
        Some(1.0)
    } else {
        Some(latest / average)
    }
}
