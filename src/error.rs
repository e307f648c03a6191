use thiserror::Error;

/// Errors surfaced by the analysis pipeline.
///
/// Validation variants are raised while building a [`crate::CandleSeries`],
/// before any computation runs. `InsufficientData` is raised by the pipeline
/// only when *every* indicator window exceeds the available history; a single
/// missing indicator degrades gracefully instead.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("candle series is empty")]
    EmptySeries,

    #[error("timestamps are not strictly increasing at bar {index}")]
    NonMonotonicTimestamps { index: usize },

    #[error("non-finite price or volume at bar {index}")]
    NonFiniteValue { index: usize },

    #[error("negative price at bar {index}")]
    NegativePrice { index: usize },

    #[error("high/low does not bound open/close at bar {index}")]
    PriceBoundsViolated { index: usize },

    #[error("negative volume at bar {index}")]
    NegativeVolume { index: usize },

    #[error("insufficient data: {bars} bars, need at least {min_bars} for any indicator")]
    InsufficientData { bars: usize, min_bars: usize },
}
