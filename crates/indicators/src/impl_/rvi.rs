//! Relative Volatility Index (RVI) indicator

use tau_types::{Category, FillMethod, MaMode, Params, Series};

use crate::ma::ma;
use crate::postprocess::postprocess;
use crate::rolling::{stdev, unsigned_differences, TieSide};

/// Relative Volatility Index
///
/// An RSI-shaped oscillator that weighs each price change by the
/// rolling standard deviation instead of using the raw change. The
/// refined variant averages the high- and low-series readings; the
/// thirds variant additionally mixes in the close-series reading.
#[derive(Debug, Clone)]
pub struct RVI {
    /// Window for the deviation and the smoothing
    pub length: usize,
    /// Oscillator scale, 100 for the classic 0-100 range
    pub scalar: f64,
    /// Average the high and low variants
    pub refined: bool,
    /// Average the high, low and close variants
    pub thirds: bool,
    /// Smoothing mode for the split averages
    pub mamode: MaMode,
    /// Difference lag for the up/down split
    pub drift: usize,
    /// Post-processing shift
    pub offset: isize,
    /// Literal fill for undefined entries
    pub fillna: Option<f64>,
    /// Fill strategy when no literal is given
    pub fill_method: Option<FillMethod>,
}

impl RVI {
    /// Creates an RVI config with the given window and the standard
    /// defaults.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length,
            scalar: 100.0,
            refined: false,
            thirds: false,
            mamode: MaMode::Ema,
            drift: 1,
            offset: 0,
            fillna: None,
            fill_method: None,
        }
    }

    /// Resolves a raw parameter record against the RVI defaults.
    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            length: params.length_or(14),
            scalar: params.scalar_or(100.0),
            refined: params.refined(),
            thirds: params.thirds(),
            mamode: params.mamode_or(MaMode::Ema),
            drift: params.drift(),
            offset: params.offset(),
            fillna: params.fillna,
            fill_method: params.fill_method,
        }
    }

    /// Sets the oscillator scale.
    #[must_use]
    pub fn with_scalar(mut self, scalar: f64) -> Self {
        self.scalar = scalar;
        self
    }

    /// Enables or disables the refined (high/low) variant.
    #[must_use]
    pub fn with_refined(mut self, refined: bool) -> Self {
        self.refined = refined;
        self
    }

    /// Enables or disables the thirds (high/low/close) variant.
    #[must_use]
    pub fn with_thirds(mut self, thirds: bool) -> Self {
        self.thirds = thirds;
        self
    }

    /// Sets the smoothing mode.
    #[must_use]
    pub fn with_mamode(mut self, mamode: MaMode) -> Self {
        self.mamode = mamode;
        self
    }

    /// Sets the difference lag.
    #[must_use]
    pub fn with_drift(mut self, drift: usize) -> Self {
        self.drift = drift;
        self
    }

    /// Sets the post-processing shift.
    #[must_use]
    pub fn with_offset(mut self, offset: isize) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the literal fill for undefined entries.
    #[must_use]
    pub fn with_fillna(mut self, fillna: f64) -> Self {
        self.fillna = Some(fillna);
        self
    }

    /// Sets the fill strategy.
    #[must_use]
    pub fn with_fill_method(mut self, fill_method: FillMethod) -> Self {
        self.fill_method = Some(fill_method);
        self
    }

    /// Output name encoding the variant and the window.
    ///
    /// The refined variant carries an `r` suffix, the thirds variant a
    /// `t` suffix; refined takes precedence when both are set.
    #[must_use]
    pub fn name(&self) -> String {
        let mode = if self.refined {
            "r"
        } else if self.thirds {
            "t"
        } else {
            ""
        };
        format!("RVI{mode}_{}", self.length)
    }

    /// Samples required before computation proceeds.
    #[must_use]
    pub fn min_periods(&self) -> usize {
        self.length
    }

    /// Computes the RVI over `close`.
    ///
    /// The refined and thirds variants additionally require `high` and
    /// `low`; they return `None` when either is missing or not aligned
    /// with `close`. Returns `None` when `close` is shorter than the
    /// window.
    #[must_use]
    pub fn compute(
        &self,
        close: &Series,
        high: Option<&Series>,
        low: Option<&Series>,
    ) -> Option<Series> {
        let close = close.verify(self.min_periods())?;

        let values = if self.refined {
            let (high, low) = aligned_pair(close, high, low)?;
            average(&[self.kernel(&high.values), self.kernel(&low.values)])
        } else if self.thirds {
            let (high, low) = aligned_pair(close, high, low)?;
            average(&[
                self.kernel(&high.values),
                self.kernel(&low.values),
                self.kernel(&close.values),
            ])
        } else {
            self.kernel(&close.values)
        };

        let values = postprocess(values, self.offset, self.fillna, self.fill_method);
        Some(Series::new(self.name(), values).with_category(Category::Volatility))
    }

    /// Single-series RVI kernel.
    ///
    /// Price changes are split into up/down magnitudes, weighted by
    /// the rolling standard deviation and smoothed; ties route to the
    /// positive side here.
    fn kernel(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        let std = stdev(values, self.length);
        let (positive, negative) = unsigned_differences(values, self.drift, TieSide::Positive);

        let pos_avg = ma(self.mamode, &multiply(&positive, &std), self.length);
        let neg_avg = ma(self.mamode, &multiply(&negative, &std), self.length);

        pos_avg
            .iter()
            .zip(neg_avg.iter())
            .map(|(p, n)| match (p, n) {
                (Some(p), Some(n)) => Some(self.scalar * p / (p + n)),
                _ => None,
            })
            .collect()
    }
}

/// Requires both companion series and positional alignment with
/// `close`.
fn aligned_pair<'a>(
    close: &Series,
    high: Option<&'a Series>,
    low: Option<&'a Series>,
) -> Option<(&'a Series, &'a Series)> {
    let high = high?;
    let low = low?;
    if high.len() != close.len() || low.len() != close.len() {
        return None;
    }
    Some((high, low))
}

/// Elementwise product; undefined wherever either factor is undefined.
fn multiply(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<Option<f64>> {
    a.iter()
        .zip(b.iter())
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(a * b),
            _ => None,
        })
        .collect()
}

/// Pointwise mean across variants; undefined wherever any variant is
/// undefined.
fn average(parts: &[Vec<Option<f64>>]) -> Vec<Option<f64>> {
    let len = parts.first().map_or(0, Vec::len);
    (0..len)
        .map(|i| {
            let mut sum = 0.0;
            for part in parts {
                sum += part[i]?;
            }
            Some(sum / parts.len() as f64)
        })
        .collect()
}
