// =============================================================================
// Enrichment Engine — derived indicator columns over an OHLCV series
// =============================================================================
//
// Takes a time-ordered OHLCV series and produces the same series enriched
// with a fixed set of indicator columns.  Every indicator is first computed
// over the *full* input into an index-aligned column; a single any-null row
// filter then keeps exactly the records where every column resolved.  The
// filter is per-row, not a head truncation: a zero-range candle late in the
// series drops just that one record, the 200-period SMA warm-up drops the
// leading 199, and the undefined swing flag drops the final one.
//
// The function is pure: no I/O, no shared state, linear time.  A series
// shorter than the longest look-back degrades to an empty result rather than
// an error.

use serde::{Deserialize, Serialize};

use crate::indicators::{atr, bollinger, ema, roc, rsi, sma, swing};
use crate::series::{closes, Candle};

/// Fixed indicator parameters. The 200-period SMA has the longest warm-up
/// and therefore determines where a clean series' output begins.
pub const RSI_PERIOD: usize = 14;
pub const SMA_PERIODS: [usize; 3] = [20, 50, 200];
pub const EMA_PERIOD: usize = 9;
pub const ATR_PERIOD: usize = 14;
pub const BB_PERIOD: usize = 20;
pub const BB_NUM_STD: f64 = 2.0;
pub const MOMENTUM_PERIOD: usize = 10;

/// One fully-computed record of the enriched series.  Every numeric field is
/// guaranteed populated and finite for finite input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCandle {
    #[serde(flatten)]
    pub candle: Candle,
    pub rsi_14: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub sma_200: f64,
    pub ema_9: f64,
    pub atr_14: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    pub swing_high: bool,
    pub swing_low: bool,
    pub body_size: f64,
    pub candle_range: f64,
    pub body_ratio: f64,
    pub momentum_10: f64,
}

/// Enrich an OHLCV series with the full indicator set.
///
/// The output is the subsequence of input records for which *every* column
/// resolved, in original order.  For a clean series of length n >= 200 that
/// is exactly `n - 200` records: the SMA-200 warm-up removes the leading 199
/// and the one-sided swing neighbourhood removes the final record.  Any
/// record with `high == low` is additionally dropped wherever it sits,
/// because its `body_ratio` is undefined there.
///
/// The input is never mutated; calling twice on the same series yields
/// bitwise-identical output.
pub fn add_indicators(candles: &[Candle]) -> Vec<EnrichedCandle> {
    let close_col = closes(candles);

    let rsi_14 = rsi::calculate_rsi(&close_col, RSI_PERIOD);
    let sma_20 = sma::calculate_sma(&close_col, SMA_PERIODS[0]);
    let sma_50 = sma::calculate_sma(&close_col, SMA_PERIODS[1]);
    let sma_200 = sma::calculate_sma(&close_col, SMA_PERIODS[2]);
    let ema_9 = ema::calculate_ema(&close_col, EMA_PERIOD);
    let atr_14 = atr::calculate_atr(candles, ATR_PERIOD);
    let bands = bollinger::calculate_bollinger(&close_col, BB_PERIOD, BB_NUM_STD);
    let momentum_10 = roc::calculate_roc(&close_col, MOMENTUM_PERIOD);
    let swing_high = swing::swing_highs(candles);
    let swing_low = swing::swing_lows(candles);

    let mut enriched = Vec::with_capacity(candles.len().saturating_sub(SMA_PERIODS[2]));

    for (i, candle) in candles.iter().enumerate() {
        let body_size = (candle.close - candle.open).abs();
        let candle_range = candle.high - candle.low;
        // Zero-range candle: the ratio is undefined, which drops the row.
        let body_ratio = if candle_range == 0.0 {
            None
        } else {
            Some(body_size / candle_range)
        };

        let row = (|| {
            let bb = bands[i]?;
            Some(EnrichedCandle {
                candle: candle.clone(),
                rsi_14: rsi_14[i]?,
                sma_20: sma_20[i]?,
                sma_50: sma_50[i]?,
                sma_200: sma_200[i]?,
                ema_9: ema_9[i]?,
                atr_14: atr_14[i]?,
                bb_upper: bb.upper,
                bb_middle: bb.middle,
                bb_lower: bb.lower,
                swing_high: swing_high[i]?,
                swing_low: swing_low[i]?,
                body_size,
                candle_range,
                body_ratio: body_ratio?,
                momentum_10: momentum_10[i]?,
            })
        })();

        if let Some(row) = row {
            enriched.push(row);
        }
    }

    enriched
}
