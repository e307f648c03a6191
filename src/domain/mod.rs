// Domain types and value objects
pub mod candle;
pub mod price_change;
pub mod sentiment;

// Re-export commonly used types
pub use candle::{Bar, CandleSeries};
pub use price_change::PriceChangeStats;
pub use sentiment::{SentimentLabel, SentimentSnapshot};
