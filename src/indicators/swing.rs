// =============================================================================
// Swing Highs / Swing Lows
// =============================================================================
//
// A swing high is a bar whose high strictly exceeds both immediate
// neighbours' highs; a swing low is the mirror image on lows.  The first and
// last bar have only one neighbour, so the flag is undefined there — those
// slots are `None` and the enrichment engine's row filter drops them along
// with every other incomplete record.

use crate::series::Candle;

/// Flag each bar whose `high` strictly exceeds both neighbours' highs.
///
/// Aligned with the input: `None` at the first and last bar (one-sided
/// neighbourhood), `Some(flag)` everywhere else.
pub fn swing_highs(candles: &[Candle]) -> Vec<Option<bool>> {
    let mut flags = vec![None; candles.len()];
    for i in 1..candles.len().saturating_sub(1) {
        flags[i] = Some(
            candles[i].high > candles[i - 1].high && candles[i].high > candles[i + 1].high,
        );
    }
    flags
}

/// Flag each bar whose `low` is strictly below both neighbours' lows.
///
/// Same alignment rules as [`swing_highs`].
pub fn swing_lows(candles: &[Candle]) -> Vec<Option<bool>> {
    let mut flags = vec![None; candles.len()];
    for i in 1..candles.len().saturating_sub(1) {
        flags[i] = Some(
            candles[i].low < candles[i - 1].low && candles[i].low < candles[i + 1].low,
        );
    }
    flags
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn candle_hl(high: f64, low: f64) -> Candle {
        Candle {
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
            open: (high + low) / 2.0,
            high,
            low,
            close: (high + low) / 2.0,
            volume: 100.0,
        }
    }

    #[test]
    fn swing_empty_and_tiny_inputs() {
        assert!(swing_highs(&[]).is_empty());
        assert_eq!(swing_highs(&[candle_hl(2.0, 1.0)]), vec![None]);
        assert_eq!(
            swing_highs(&[candle_hl(2.0, 1.0), candle_hl(3.0, 2.0)]),
            vec![None, None]
        );
    }

    #[test]
    fn swing_high_detected() {
        let candles = vec![
            candle_hl(101.0, 99.0),
            candle_hl(105.0, 100.0), // local peak
            candle_hl(102.0, 98.0),
        ];
        assert_eq!(swing_highs(&candles), vec![None, Some(true), None]);
    }

    #[test]
    fn swing_low_detected() {
        let candles = vec![
            candle_hl(101.0, 99.0),
            candle_hl(100.0, 95.0), // local trough
            candle_hl(102.0, 98.0),
        ];
        assert_eq!(swing_lows(&candles), vec![None, Some(true), None]);
    }

    #[test]
    fn swing_requires_strict_inequality() {
        // Equal highs on both sides => not a swing high.
        let candles = vec![
            candle_hl(105.0, 99.0),
            candle_hl(105.0, 100.0),
            candle_hl(105.0, 98.0),
        ];
        assert_eq!(swing_highs(&candles), vec![None, Some(false), None]);
    }

    #[test]
    fn swing_boundaries_are_undefined() {
        // Monotone highs: the last bar is the maximum but has no right
        // neighbour, so its slot is None, never Some(true).
        let candles: Vec<Candle> =
            (0..10).map(|i| candle_hl(100.0 + i as f64, 90.0)).collect();
        let flags = swing_highs(&candles);
        assert_eq!(flags[0], None);
        assert_eq!(flags[9], None);
        assert!(flags[1..9].iter().all(|&f| f == Some(false)));
    }
}
