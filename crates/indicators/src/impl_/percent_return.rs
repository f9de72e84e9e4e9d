//! Percent Return (PCTRET) indicator

use tau_types::{Category, FillMethod, Params, Series};

use crate::postprocess::postprocess;
use crate::rolling::shift;

/// Percent Return
///
/// Fractional price change over `length` bars, or the running return
/// against the first bar when cumulative. The lagged form leaves the
/// first `length` entries undefined.
#[derive(Debug, Clone)]
pub struct PercentReturn {
    /// Return lag in bars
    pub length: usize,
    /// Measure against the first bar instead of a lag
    pub cumulative: bool,
    /// Post-processing shift
    pub offset: isize,
    /// Literal fill for undefined entries
    pub fillna: Option<f64>,
    /// Fill strategy when no literal is given
    pub fill_method: Option<FillMethod>,
}

impl PercentReturn {
    /// Creates a config with the given lag and the standard defaults.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length,
            cumulative: false,
            offset: 0,
            fillna: None,
            fill_method: None,
        }
    }

    /// Resolves a raw parameter record against the defaults.
    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            length: params.length_or(1),
            cumulative: params.cumulative(),
            offset: params.offset(),
            fillna: params.fillna,
            fill_method: params.fill_method,
        }
    }

    /// Switches between the cumulative and the lagged form.
    #[must_use]
    pub fn with_cumulative(mut self, cumulative: bool) -> Self {
        self.cumulative = cumulative;
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

    /// Output name; the cumulative form carries a `CUM` prefix.
    #[must_use]
    pub fn name(&self) -> String {
        let prefix = if self.cumulative { "CUM" } else { "" };
        format!("{prefix}PCTRET_{}", self.length)
    }

    /// Samples required before computation proceeds.
    #[must_use]
    pub fn min_periods(&self) -> usize {
        self.length
    }

    /// Computes the percent return over `close`.
    ///
    /// Returns `None` when the input is shorter than the lag.
    #[must_use]
    pub fn compute(&self, close: &Series) -> Option<Series> {
        let close = close.verify(self.min_periods())?;

        let values: Vec<Option<f64>> = if self.cumulative {
            let base = close.values.first().copied().flatten();
            close
                .values
                .iter()
                .map(|v| match (*v, base) {
                    (Some(v), Some(base)) => Some(v / base - 1.0),
                    _ => None,
                })
                .collect()
        } else {
            let lagged = shift(&close.values, self.length as isize);
            close
                .values
                .iter()
                .zip(lagged.iter())
                .map(|(curr, prev)| match (curr, prev) {
                    (Some(curr), Some(prev)) => Some(curr / prev - 1.0),
                    _ => None,
                })
                .collect()
        };

        let values = postprocess(values, self.offset, self.fillna, self.fill_method);
        Some(Series::new(self.name(), values).with_category(Category::Performance))
    }
}
