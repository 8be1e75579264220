// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ).  σ is the *population* standard deviation of
// the window (divide by n, Bessel's correction off) — the sample variant
// produces visibly different bands and must not be substituted.

use crate::indicators::sma::calculate_sma;

/// One row of the Bollinger Band columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerRow {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Compute the Bollinger Band columns for the given closing prices.
///
/// The result is aligned with the input: `None` before index `period - 1`,
/// then one `BollingerRow` per close where:
/// - `middle` = SMA(`period`)
/// - `upper`  = middle + `num_std` * σ
/// - `lower`  = middle - `num_std` * σ
///
/// # Edge cases
/// - `period == 0` or `closes.len() < period` => all-`None` column
/// - A flat window collapses all three bands onto the middle (σ == 0).
pub fn calculate_bollinger(
    closes: &[f64],
    period: usize,
    num_std: f64,
) -> Vec<Option<BollingerRow>> {
    let mut column = vec![None; closes.len()];
    if period == 0 || closes.len() < period {
        return column;
    }

    let middles = calculate_sma(closes, period);

    for i in (period - 1)..closes.len() {
        let window = &closes[i + 1 - period..=i];
        let Some(middle) = middles[i] else { continue };

        let variance =
            window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
        let std_dev = variance.sqrt();

        column[i] = Some(BollingerRow {
            upper: middle + num_std * std_dev,
            middle,
            lower: middle - num_std * std_dev,
        });
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
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let column = calculate_bollinger(&closes, 20, 2.0);
        assert!(column[..19].iter().all(|s| s.is_none()));
        let bb = column[19].unwrap();
        assert!(bb.upper > bb.middle);
        assert!(bb.lower < bb.middle);
        assert!((bb.middle - 10.5).abs() < 1e-10);
    }

    #[test]
    fn bollinger_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        assert!(calculate_bollinger(&closes, 20, 2.0).iter().all(|s| s.is_none()));
    }

    #[test]
    fn bollinger_flat_bands_collapse() {
        let closes = vec![100.0; 25];
        let column = calculate_bollinger(&closes, 20, 2.0);
        for bb in column.into_iter().flatten() {
            assert!((bb.upper - 100.0).abs() < 1e-10);
            assert!((bb.middle - 100.0).abs() < 1e-10);
            assert!((bb.lower - 100.0).abs() < 1e-10);
        }
    }

    #[test]
    fn bollinger_population_std_dev() {
        // Window [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population σ = 2 exactly.
        let closes = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let column = calculate_bollinger(&closes, 8, 2.0);
        let bb = column[7].unwrap();
        assert!((bb.middle - 5.0).abs() < 1e-10);
        assert!((bb.upper - 9.0).abs() < 1e-10, "sample σ would give {}", bb.upper);
        assert!((bb.lower - 1.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_bands_are_symmetric() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let column = calculate_bollinger(&closes, 20, 2.0);
        for bb in column.into_iter().flatten() {
            assert!((bb.upper - bb.middle - (bb.middle - bb.lower)).abs() < 1e-10);
        }
    }
}
