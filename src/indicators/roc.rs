// =============================================================================
// Rate of Change (ROC) — Momentum Indicator
// =============================================================================
//
// ROC measures the percentage change in price over a look-back period:
//   ROC = ((close - close_n) / close_n) * 100
//
// Positive ROC indicates upward momentum; negative indicates downward.  The
// engine uses the 10-period variant as its `momentum_10` column.

/// Compute the ROC column for the given closing prices and period.
///
/// The result is aligned with the input: `None` for the first `period` slots
/// (no lagged close yet) and wherever the lagged close is exactly zero
/// (degenerate denominator), `Some` everywhere else.
pub fn calculate_roc(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut column = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return column;
    }

    for i in period..closes.len() {
        let prev = closes[i - period];
        if prev != 0.0 {
            column[i] = Some(((closes[i] - prev) / prev) * 100.0);
        }
    }

    column
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roc_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let roc = calculate_roc(&closes, 14);
        assert!(roc[..14].iter().all(|s| s.is_none()));
        // From 1 to 15: ROC = (15-1)/1 * 100 = 1400%
        assert!((roc[14].unwrap() - 1400.0).abs() < 1e-10);
    }

    #[test]
    fn roc_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        assert!(calculate_roc(&closes, 14).iter().all(|s| s.is_none()));
    }

    #[test]
    fn roc_zero_lagged_close_is_none() {
        let closes = vec![0.0, 1.0, 2.0, 3.0];
        let roc = calculate_roc(&closes, 2);
        assert_eq!(roc[2], None); // lagged close is 0.0
        assert!((roc[3].unwrap() - 200.0).abs() < 1e-10);
    }

    #[test]
    fn roc_flat_series_is_zero() {
        let closes = vec![100.0; 20];
        let roc = calculate_roc(&closes, 10);
        for slot in roc.into_iter().flatten() {
            assert!(slot.abs() < 1e-10);
        }
    }
}
