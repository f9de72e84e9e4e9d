//! Price Distance (PDIST) indicator

use tau_types::{Category, FillMethod, Params, Series};

use crate::postprocess::postprocess;
use crate::rolling::{non_zero_range, shift};

/// Price Distance
///
/// Total distance covered by a bar: twice the high/low range, plus
/// the gap against the prior close, minus the bar body. Bars that
/// gap and retrace score higher than bars that travel in one line.
#[derive(Debug, Clone)]
pub struct PriceDistance {
    /// Lag for the prior-close gap term
    pub drift: usize,
    /// Post-processing shift
    pub offset: isize,
    /// Literal fill for undefined entries
    pub fillna: Option<f64>,
    /// Fill strategy when no literal is given
    pub fill_method: Option<FillMethod>,
}

impl PriceDistance {
    /// Creates a config with the standard defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            drift: 1,
            offset: 0,
            fillna: None,
            fill_method: None,
        }
    }

    /// Resolves a raw parameter record against the defaults.
    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            drift: params.drift(),
            offset: params.offset(),
            fillna: params.fillna,
            fill_method: params.fill_method,
        }
    }

    /// Sets the prior-close lag.
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

    /// Output name; carries no parameters.
    #[must_use]
    pub fn name(&self) -> String {
        String::from("PDIST")
    }

    /// Samples required before the first defined entry.
    #[must_use]
    pub fn min_periods(&self) -> usize {
        self.drift + 1
    }

    /// Computes the price distance over one bar series.
    ///
    /// There is no minimum length; the first `drift` entries are
    /// undefined because the prior close is unavailable there.
    /// Returns `None` when the four inputs are not aligned.
    #[must_use]
    pub fn compute(
        &self,
        open: &Series,
        high: &Series,
        low: &Series,
        close: &Series,
    ) -> Option<Series> {
        let len = open.len();
        if high.len() != len || low.len() != len || close.len() != len {
            return None;
        }

        let prior_close = shift(&close.values, self.drift as isize);
        let range = non_zero_range(&high.values, &low.values);
        let gap = non_zero_range(&open.values, &prior_close);
        let body = non_zero_range(&close.values, &open.values);

        let values = (0..len)
            .map(|i| match (range[i], gap[i], body[i]) {
                (Some(range), Some(gap), Some(body)) => {
                    Some(2.0 * range + gap.abs() - body.abs())
                }
                _ => None,
            })
            .collect();

        let values = postprocess(values, self.offset, self.fillna, self.fill_method);
        Some(Series::new(self.name(), values).with_category(Category::Volatility))
    }
}

impl Default for PriceDistance {
    fn default() -> Self {
        Self::new()
    }
}
