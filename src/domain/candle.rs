use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// One OHLCV observation for a fixed time interval, as supplied by the host
/// service.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    fn validate(&self, index: usize) -> Result<(), AnalysisError> {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(AnalysisError::NonFiniteValue { index });
        }
        if self.open < 0.0 || self.high < 0.0 || self.low < 0.0 || self.close < 0.0 {
            return Err(AnalysisError::NegativePrice { index });
        }
        if self.high < self.open.max(self.close) || self.low > self.open.min(self.close) {
            return Err(AnalysisError::PriceBoundsViolated { index });
        }
        if self.volume < 0.0 {
            return Err(AnalysisError::NegativeVolume { index });
        }
        Ok(())
    }
}

// ============================================================================
// CandleSeries: validated, immutable price history for one analysis request
// ============================================================================

/// Column-oriented series so indicator windows can slice a single price field
/// without walking bar structs. Built only via [`CandleSeries::from_bars`];
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    timestamps: Vec<DateTime<Utc>>,
    open_prices: Vec<f64>,
    high_prices: Vec<f64>,
    low_prices: Vec<f64>,
    close_prices: Vec<f64>,
    volumes: Vec<f64>,
}

impl CandleSeries {
    /// Validate and normalize an ordered sequence of bars.
    ///
    /// Rejects empty input, non-strictly-increasing timestamps, non-finite or
    /// negative prices/volumes and high/low values that do not bound the bar
    /// body. NaN fields are caught here explicitly because they would slip
    /// through every ordering comparison below.
    pub fn from_bars(bars: &[Bar]) -> Result<Self, AnalysisError> {
        if bars.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }

        let mut series = CandleSeries {
            timestamps: Vec::with_capacity(bars.len()),
            open_prices: Vec::with_capacity(bars.len()),
            high_prices: Vec::with_capacity(bars.len()),
            low_prices: Vec::with_capacity(bars.len()),
            close_prices: Vec::with_capacity(bars.len()),
            volumes: Vec::with_capacity(bars.len()),
        };

        for (index, bar) in bars.iter().enumerate() {
            bar.validate(index)?;

            if let Some(&previous) = series.timestamps.last()
                && bar.timestamp <= previous
            {
                return Err(AnalysisError::NonMonotonicTimestamps { index });
            }

            series.timestamps.push(bar.timestamp);
            series.open_prices.push(bar.open);
            series.high_prices.push(bar.high);
            series.low_prices.push(bar.low);
            series.close_prices.push(bar.close);
            series.volumes.push(bar.volume);
        }

        Ok(series)
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false: emptiness is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn open_prices(&self) -> &[f64] {
        &self.open_prices
    }

    pub fn high_prices(&self) -> &[f64] {
        &self.high_prices
    }

    pub fn low_prices(&self) -> &[f64] {
        &self.low_prices
    }

    pub fn close_prices(&self) -> &[f64] {
        &self.close_prices
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    pub fn latest_close(&self) -> f64 {
        *self.close_prices.last().expect("series is non-empty")
    }

    pub fn latest_volume(&self) -> f64 {
        *self.volumes.last().expect("series is non-empty")
    }

    pub fn latest_timestamp(&self) -> DateTime<Utc> {
        *self.timestamps.last().expect("series is non-empty")
    }
}
