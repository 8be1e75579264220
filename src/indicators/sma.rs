// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA is the arithmetic mean of the trailing `period` closes, including the
// current one.  The engine computes it at three windows (20 / 50 / 200); the
// 200-period window has the longest warm-up of any indicator and therefore
// dominates the engine's row filter.

/// Compute the SMA column for the given `closes` slice and look-back `period`.
///
/// The result has exactly one slot per input close.  Slots before index
/// `period - 1` are `None` (not enough history); every later slot holds the
/// mean of the trailing `period` closes.
///
/// # Edge cases
/// - `period == 0` => all-`None` column (division by zero guard)
/// - `closes.len() < period` => all-`None` column
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut column = vec![None; closes.len()];
    if period == 0 || closes.len() < period {
        return column;
    }

    // Rolling sum: subtract the close leaving the window, add the one entering.
    let mut sum: f64 = closes[..period].iter().sum();
    column[period - 1] = Some(sum / period as f64);

    for i in period..closes.len() {
        sum += closes[i] - closes[i - period];
        column[i] = Some(sum / period as f64);
    }

    column
}
