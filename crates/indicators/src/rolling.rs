//! Rolling and pointwise aggregation primitives.
//!
//! Every primitive takes sample slices and returns vectors of the same
//! length; `None` marks warm-up or otherwise undefined entries.

/// Replacement for an exact-zero range, keeps downstream divisions finite.
pub const ZERO_RANGE_EPSILON: f64 = 1e-13;

/// Side that receives a zero difference in [`unsigned_differences`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieSide {
    /// Zero differences count toward the positive series
    Positive,
    /// Zero differences count toward the negative series
    #[default]
    Negative,
}

/// Lagged difference: `value[i] - value[i - lag]`.
///
/// The first `lag` entries are undefined, as is any entry with an
/// undefined operand.
#[must_use]
pub fn diff(values: &[Option<f64>], lag: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for i in lag..values.len() {
        if let (Some(curr), Some(prev)) = (values[i], values[i - lag]) {
            out[i] = Some(curr - prev);
        }
    }
    out
}

/// Absolute lagged difference.
#[must_use]
pub fn abs_diff(values: &[Option<f64>], lag: usize) -> Vec<Option<f64>> {
    diff(values, lag)
        .into_iter()
        .map(|v| v.map(f64::abs))
        .collect()
}

/// Trailing window sum.
///
/// Undefined until `window` samples are available and whenever the
/// window contains an undefined sample.
#[must_use]
pub fn rolling_sum(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let len = values.len();
    let mut out = vec![None; len];
    if window == 0 || len < window {
        return out;
    }

    let mut sum = 0.0;
    let mut missing = 0usize;
    for i in 0..len {
        match values[i] {
            Some(v) => sum += v,
            None => missing += 1,
        }
        if i >= window {
            match values[i - window] {
                Some(v) => sum -= v,
                None => missing -= 1,
            }
        }
        if i + 1 >= window && missing == 0 {
            out[i] = Some(sum);
        }
    }
    out
}

/// Trailing window mean, the simple moving-average kernel.
#[must_use]
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_sum(values, window)
        .into_iter()
        .map(|v| v.map(|sum| sum / window as f64))
        .collect()
}

/// Trailing sample standard deviation (ddof = 1).
///
/// Undefined during warm-up, for windows shorter than 2 and whenever
/// the window contains an undefined sample.
#[must_use]
pub fn stdev(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let len = values.len();
    let mut out = vec![None; len];
    if window < 2 || len < window {
        return out;
    }

    for i in (window - 1)..len {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(Option::is_none) {
            continue;
        }
        let mean = slice.iter().flatten().sum::<f64>() / window as f64;
        let variance = slice
            .iter()
            .flatten()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / (window as f64 - 1.0);
        out[i] = Some(variance.sqrt());
    }
    out
}

/// Pure positional shift.
///
/// Positive offsets move samples toward the end and leave `offset`
/// undefined entries at the front; negative offsets mirror. No
/// wraparound.
#[must_use]
pub fn shift(values: &[Option<f64>], offset: isize) -> Vec<Option<f64>> {
    let len = values.len();
    let mut out = vec![None; len];
    if offset >= 0 {
        let k = offset.unsigned_abs();
        for i in k..len {
            out[i] = values[i - k];
        }
    } else {
        let k = offset.unsigned_abs();
        for i in 0..len.saturating_sub(k) {
            out[i] = values[i + k];
        }
    }
    out
}

/// Elementwise `a - b` with exact zeros replaced by a fixed epsilon.
///
/// The replacement keeps ranges usable as divisors when high equals
/// low. It is exact and per element, not a rounding artifact.
#[must_use]
pub fn non_zero_range(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<Option<f64>> {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => {
                let d = x - y;
                if d == 0.0 {
                    Some(ZERO_RANGE_EPSILON)
                } else {
                    Some(d)
                }
            }
            _ => None,
        })
        .collect()
}

/// Splits the lagged difference into non-negative positive and
/// negative parts.
///
/// `positive[i]` carries the difference where it is above zero,
/// `negative[i]` its magnitude where it is below zero; the other side
/// is 0. Zero differences route to the side named by `tie`; both
/// sides of the first element are forced to 1.0. Undefined differences
/// beyond the first element contribute 0 to both sides.
#[must_use]
pub fn unsigned_differences(
    values: &[Option<f64>],
    lag: usize,
    tie: TieSide,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let d = diff(values, lag);
    let len = d.len();
    let mut positive = vec![Some(0.0); len];
    let mut negative = vec![Some(0.0); len];

    for (i, value) in d.iter().enumerate() {
        if let Some(v) = value {
            let take_positive = match tie {
                TieSide::Positive => *v >= 0.0,
                TieSide::Negative => *v > 0.0,
            };
            if take_positive {
                positive[i] = Some(*v);
            } else {
                negative[i] = Some(v.abs());
            }
        }
    }

    if len > 0 {
        positive[0] = Some(1.0);
        negative[0] = Some(1.0);
    }

    (positive, negative)
}
