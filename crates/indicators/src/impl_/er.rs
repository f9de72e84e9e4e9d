//! Efficiency Ratio (ER) indicator

use tau_types::{Category, FillMethod, Frame, Params, Series};

use crate::postprocess::postprocess;
use crate::rolling::{abs_diff, rolling_sum};
use crate::signals::{signal_table, SignalOptions};

/// Kaufman's Efficiency Ratio
///
/// Net price change over the total path length covered to get there;
/// values near 1 mark trending movement, values near 0 choppy
/// movement.
#[derive(Debug, Clone)]
pub struct ER {
    /// Measurement window
    pub length: usize,
    /// Difference lag for the path decomposition
    pub drift: usize,
    /// Post-processing shift
    pub offset: isize,
    /// Literal fill for undefined entries
    pub fillna: Option<f64>,
    /// Fill strategy when no literal is given
    pub fill_method: Option<FillMethod>,
}

impl ER {
    /// Creates an ER config with the given window and the standard
    /// defaults.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length,
            drift: 1,
            offset: 0,
            fillna: None,
            fill_method: None,
        }
    }

    /// Resolves a raw parameter record against the ER defaults.
    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            length: params.length_or(10),
            drift: params.drift(),
            offset: params.offset(),
            fillna: params.fillna,
            fill_method: params.fill_method,
        }
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

    /// Output name encoding the window.
    #[must_use]
    pub fn name(&self) -> String {
        format!("ER_{}", self.length)
    }

    /// Samples required before computation proceeds.
    #[must_use]
    pub fn min_periods(&self) -> usize {
        self.length
    }

    /// Computes the efficiency ratio over `close`.
    ///
    /// Returns `None` when the input is shorter than the window.
    #[must_use]
    pub fn compute(&self, close: &Series) -> Option<Series> {
        let close = close.verify(self.min_periods())?;

        let net = abs_diff(&close.values, self.length);
        let path = rolling_sum(&abs_diff(&close.values, self.drift), self.length);

        let values = net
            .iter()
            .zip(path.iter())
            .map(|(n, p)| match (n, p) {
                (Some(n), Some(p)) => Some(n / p),
                _ => None,
            })
            .collect();

        let values = postprocess(values, self.offset, self.fillna, self.fill_method);
        Some(Series::new(self.name(), values).with_category(Category::Momentum))
    }

    /// Computes the ER plus its signal columns, indicator first.
    #[must_use]
    pub fn compute_signals(&self, close: &Series, options: &SignalOptions<'_>) -> Option<Frame> {
        signal_table(self.compute(close)?, options)
    }
}
