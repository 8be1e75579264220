// =============================================================================
// Price series types
// =============================================================================
//
// A series is a slice of `Candle`s ordered by strictly ascending timestamp.
// Uniqueness and ordering of timestamps are a caller contract (the provider
// deduplicates and sorts before handing a series to anyone else); the
// indicator engine assumes them and never re-checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One period's OHLCV summary for a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Extract the close column from a series.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
