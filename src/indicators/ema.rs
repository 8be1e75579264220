// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The very first EMA value is seeded with the SMA of the first `period`
// closes; seeding with the raw first close would produce a numerically
// different series, so the convention is fixed here.

/// Compute the EMA column for the given `closes` slice and look-back `period`.
///
/// The result is aligned with the input: slots before index `period - 1` are
/// `None`, the slot at `period - 1` holds the SMA seed, and every later slot
/// is the recursive EMA update.
///
/// # Edge cases
/// - `period == 0` => all-`None` column (division by zero guard)
/// - `closes.len() < period` => all-`None` column
pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut column = vec![None; closes.len()];
    if period == 0 || closes.len() < period {
        return column;
    }

    let multiplier = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let seed: f64 = closes[..period].iter().sum::<f64>() / period as f64;
    column[period - 1] = Some(seed);

    let mut prev_ema = seed;
    for i in period..closes.len() {
        let ema = closes[i] * multiplier + prev_ema * (1.0 - multiplier);
        column[i] = Some(ema);
        prev_ema = ema;
    }

    column
}
