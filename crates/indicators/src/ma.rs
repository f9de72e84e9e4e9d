//! Moving-average kernels and the mode dispatcher.

use tau_types::MaMode;

use crate::rolling::rolling_mean;

/// Dispatches to the kernel selected by `mode`.
///
/// The mode set is closed; unrecognized mode names already degrade to
/// a default during parameter resolution, so the dispatcher itself is
/// total. Output length matches input, warm-up entries are undefined,
/// and no state survives the call.
#[must_use]
pub fn ma(mode: MaMode, values: &[Option<f64>], length: usize) -> Vec<Option<f64>> {
    match mode {
        MaMode::Sma => sma(values, length),
        MaMode::Ema => ema(values, length),
        MaMode::Rma => rma(values, length),
        MaMode::Wma => wma(values, length),
    }
}

/// Unweighted rolling mean, the fallback kernel.
#[must_use]
pub fn sma(values: &[Option<f64>], length: usize) -> Vec<Option<f64>> {
    rolling_mean(values, length)
}

/// Exponential moving average, alpha = 2 / (length + 1).
#[must_use]
pub fn ema(values: &[Option<f64>], length: usize) -> Vec<Option<f64>> {
    recursive_ma(values, length, 2.0 / (length as f64 + 1.0))
}

/// Wilder moving average, alpha = 1 / length.
#[must_use]
pub fn rma(values: &[Option<f64>], length: usize) -> Vec<Option<f64>> {
    recursive_ma(values, length, 1.0 / length as f64)
}

/// Linearly weighted rolling mean, newest sample weighted heaviest.
#[must_use]
pub fn wma(values: &[Option<f64>], length: usize) -> Vec<Option<f64>> {
    let len = values.len();
    let mut out = vec![None; len];
    if length == 0 || len < length {
        return out;
    }

    let denom = (length * (length + 1)) as f64 / 2.0;
    for i in (length - 1)..len {
        let window = &values[i + 1 - length..=i];
        if window.iter().any(Option::is_none) {
            continue;
        }
        let weighted = window
            .iter()
            .flatten()
            .enumerate()
            .map(|(k, v)| (k as f64 + 1.0) * v)
            .sum::<f64>();
        out[i] = Some(weighted / denom);
    }
    out
}

/// Left-to-right recurrence `avg += alpha * (value - avg)`, seeded
/// with the simple mean of the first `length` consecutive defined
/// samples.
///
/// Entries before the seed window completes are undefined. After
/// seeding, an undefined sample holds the previous average.
fn recursive_ma(values: &[Option<f64>], length: usize, alpha: f64) -> Vec<Option<f64>> {
    let len = values.len();
    let mut out = vec![None; len];
    if length == 0 || len < length {
        return out;
    }

    let Some(start) = seed_start(values, length) else {
        return out;
    };

    let seed_end = start + length;
    let mut avg = values[start..seed_end].iter().flatten().sum::<f64>() / length as f64;
    out[seed_end - 1] = Some(avg);

    for i in seed_end..len {
        if let Some(v) = values[i] {
            avg += alpha * (v - avg);
        }
        out[i] = Some(avg);
    }
    out
}

/// First index of a run of `length` consecutive defined samples.
fn seed_start(values: &[Option<f64>], length: usize) -> Option<usize> {
    let mut run = 0usize;
    for (i, v) in values.iter().enumerate() {
        if v.is_some() {
            run += 1;
            if run == length {
                return Some(i + 1 - length);
            }
        } else {
            run = 0;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_sma_basic() {
        let values = dense(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = sma(&values, 3);
        assert_eq!(result, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_ema_seeded_with_simple_mean() {
        let values = dense(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = ema(&values, 3);

        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert!((result[2].unwrap() - 2.0).abs() < 1e-10);
        assert!((result[3].unwrap() - 3.0).abs() < 1e-10);
        assert!((result[4].unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_rma_wilder_alpha() {
        let values = dense(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = rma(&values, 3);

        assert!((result[2].unwrap() - 2.0).abs() < 1e-10);
        assert!((result[3].unwrap() - (2.0 + 2.0 / 3.0)).abs() < 1e-10);
        let expected4 = 2.0 + 2.0 / 3.0 + (5.0 - (2.0 + 2.0 / 3.0)) / 3.0;
        assert!((result[4].unwrap() - expected4).abs() < 1e-10);
    }

    #[test]
    fn test_wma_weights() {
        let values = dense(&[1.0, 2.0, 3.0, 4.0]);
        let result = wma(&values, 3);
        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert!((result[2].unwrap() - 14.0 / 6.0).abs() < 1e-10);
        assert!((result[3].unwrap() - 20.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_recursive_holds_previous_on_undefined() {
        let values = vec![Some(1.0), Some(2.0), Some(3.0), None, Some(5.0)];
        let result = ema(&values, 2);

        assert!(result[0].is_none());
        assert!((result[1].unwrap() - 1.5).abs() < 1e-10);
        assert!((result[2].unwrap() - 2.5).abs() < 1e-10);
        assert!((result[3].unwrap() - 2.5).abs() < 1e-10);
        let expected4 = 2.5 + 2.0 / 3.0 * (5.0 - 2.5);
        assert!((result[4].unwrap() - expected4).abs() < 1e-10);
    }

    #[test]
    fn test_seed_skips_leading_undefined() {
        let values = vec![None, None, Some(2.0), Some(4.0), Some(6.0)];
        let result = rma(&values, 2);

        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert!(result[2].is_none());
        assert!((result[3].unwrap() - 3.0).abs() < 1e-10);
        assert!((result[4].unwrap() - 4.5).abs() < 1e-10);
    }

    #[test]
    fn test_no_seed_window_yields_all_undefined() {
        let values = vec![Some(1.0), None, Some(2.0), None, Some(3.0)];
        let result = ema(&values, 2);
        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn test_ma_dispatch_matches_kernels() {
        let values = dense(&[2.0, 4.0, 6.0, 8.0]);
        assert_eq!(ma(MaMode::Sma, &values, 2), sma(&values, 2));
        assert_eq!(ma(MaMode::Ema, &values, 2), ema(&values, 2));
        assert_eq!(ma(MaMode::Rma, &values, 2), rma(&values, 2));
        assert_eq!(ma(MaMode::Wma, &values, 2), wma(&values, 2));
    }

    #[test]
    fn test_zero_length_is_all_undefined() {
        let values = dense(&[1.0, 2.0, 3.0]);
        assert!(ma(MaMode::Sma, &values, 0).iter().all(Option::is_none));
        assert!(ma(MaMode::Ema, &values, 0).iter().all(Option::is_none));
        assert!(ma(MaMode::Wma, &values, 0).iter().all(Option::is_none));
    }

    #[test]
    fn test_short_input_is_all_undefined() {
        let values = dense(&[1.0, 2.0]);
        assert!(ma(MaMode::Rma, &values, 3).iter().all(Option::is_none));
    }

    #[test]
    fn test_constant_input_stays_constant() {
        let values = dense(&[5.0; 12]);
        for mode in [MaMode::Sma, MaMode::Ema, MaMode::Rma, MaMode::Wma] {
            let result = ma(mode, &values, 4);
            for v in result.iter().flatten() {
                assert!((v - 5.0).abs() < 1e-10, "{mode:?}: {v}");
            }
        }
    }
}
