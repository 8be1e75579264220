// =============================================================================
// Average True Range (ATR) — Wilder's Smoothing Method
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar:
//   TR_0 = H_0 - L_0                      (no previous close exists)
//   TR_t = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is then the smoothed average of TR using Wilder's method:
//   ATR at index period-1 = SMA of the first `period` TR values
//   ATR_t                 = (ATR_{t-1} * (period - 1) + TR_t) / period

use crate::series::Candle;

/// Compute the ATR column for a slice of OHLCV candles using Wilder's
/// smoothing method.
///
/// The result is aligned with the input: `None` before index `period - 1`,
/// `Some` from there on.  Because the first bar's true range falls back to
/// its own high-low span, `period` candles are enough to produce the seed.
///
/// # Edge cases
/// - `period == 0` => all-`None` column
/// - `candles.len() < period` => all-`None` column
pub fn calculate_atr(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut column = vec![None; candles.len()];
    if period == 0 || candles.len() < period {
        return column;
    }

    // --- Step 1: True Range per bar ------------------------------------------
    let mut tr_values: Vec<f64> = Vec::with_capacity(candles.len());
    tr_values.push(candles[0].high - candles[0].low);
    for i in 1..candles.len() {
        let high = candles[i].high;
        let low = candles[i].low;
        let prev_close = candles[i - 1].close;

        let hl = high - low;
        let hc = (high - prev_close).abs();
        let lc = (low - prev_close).abs();

        tr_values.push(hl.max(hc).max(lc));
    }

    // --- Step 2: Seed ATR with SMA of first `period` TR values ---------------
    let mut atr: f64 = tr_values[..period].iter().sum::<f64>() / period as f64;
    column[period - 1] = Some(atr);

    // --- Step 3: Wilder's smoothing for remaining TR values ------------------
    let period_f = period as f64;
    for i in period..tr_values.len() {
        atr = (atr * (period_f - 1.0) + tr_values[i]) / period_f;
        column[i] = Some(atr);
    }

    column
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Build a test candle with the given OHLC values.
    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
            open,
            high,
            low,
            close,
            volume: 100.0,
        }
    }

    #[test]
    fn atr_period_zero() {
        let candles = vec![candle(100.0, 105.0, 95.0, 102.0); 20];
        assert!(calculate_atr(&candles, 0).iter().all(|s| s.is_none()));
    }

    #[test]
    fn atr_insufficient_data() {
        let candles = vec![candle(100.0, 105.0, 95.0, 102.0); 10];
        assert!(calculate_atr(&candles, 14).iter().all(|s| s.is_none()));
    }

    #[test]
    fn atr_warm_up_alignment() {
        // With period candles the seed lands at index period-1: the first
        // bar's TR is its own high-low span.
        let candles = vec![candle(100.0, 105.0, 95.0, 100.0); 14];
        let atr = calculate_atr(&candles, 14);
        assert!(atr[..13].iter().all(|s| s.is_none()));
        assert!((atr[13].unwrap() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn atr_constant_range() {
        // All candles have the same range (H-L=10), close at midpoint.
        // TR is constant so ATR should stay pinned at 10.
        let mut candles = Vec::new();
        for i in 0..30 {
            let base = 100.0 + i as f64 * 0.1; // slight drift
            candles.push(candle(base, base + 5.0, base - 5.0, base));
        }
        let atr = calculate_atr(&candles, 14);
        let last = atr.last().unwrap().unwrap();
        assert!((last - 10.0).abs() < 1.0, "expected ATR near 10.0, got {last}");
    }

    #[test]
    fn atr_true_range_uses_prev_close() {
        // Gap scenario: |H - prevClose| > H - L
        let candles = vec![
            candle(100.0, 105.0, 95.0, 95.0),   // close at low
            candle(110.0, 115.0, 108.0, 112.0), // gap up: |115-95|=20 > 115-108=7
            candle(112.0, 118.0, 110.0, 115.0),
            candle(115.0, 120.0, 113.0, 118.0),
        ];
        let atr = calculate_atr(&candles, 3);
        // TR = [10, 20, 8, 7]; seed at index 2 = (10+20+8)/3.
        assert!((atr[2].unwrap() - 38.0 / 3.0).abs() < 1e-10);
        // Wilder update: (seed*2 + 7)/3.
        assert!((atr[3].unwrap() - (38.0 / 3.0 * 2.0 + 7.0) / 3.0).abs() < 1e-10);
    }

    #[test]
    fn atr_result_is_positive() {
        let candles: Vec<Candle> = (0..50)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.5).sin() * 10.0;
                candle(base - 0.5, base + 2.0, base - 2.0, base + 0.5)
            })
            .collect();
        let atr = calculate_atr(&candles, 14);
        for slot in atr.into_iter().flatten() {
            assert!(slot > 0.0, "ATR must be positive, got {slot}");
        }
    }
}
