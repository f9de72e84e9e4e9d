//! Price Volume Rank (PVR) indicator

use tau_types::{Category, Params, Series};

use crate::rolling::diff;

/// Price Volume Rank
///
/// Categorical code 1 to 4 from the sign quadrant of the price and
/// volume changes: rising price ranks 1 with rising volume and 2 with
/// falling volume, falling price ranks 3 and 4 the same way. Flat
/// changes count as rising. The output is categorical; there is no
/// smoothing, shifting or filling.
#[derive(Debug, Clone)]
pub struct PVR {
    /// Difference lag for both inputs
    pub drift: usize,
}

impl PVR {
    /// Creates a config with the standard defaults.
    #[must_use]
    pub fn new() -> Self {
        Self { drift: 1 }
    }

    /// Resolves a raw parameter record against the defaults.
    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            drift: params.drift(),
        }
    }

    /// Sets the difference lag.
    #[must_use]
    pub fn with_drift(mut self, drift: usize) -> Self {
        self.drift = drift;
        self
    }

    /// Output name; carries no parameters.
    #[must_use]
    pub fn name(&self) -> String {
        String::from("PVR")
    }

    /// Samples required before the first defined entry.
    #[must_use]
    pub fn min_periods(&self) -> usize {
        self.drift + 1
    }

    /// Computes the rank code over aligned close and volume series.
    ///
    /// The first `drift` entries are undefined because no change is
    /// available there. Returns `None` when the inputs are not
    /// aligned.
    #[must_use]
    pub fn compute(&self, close: &Series, volume: &Series) -> Option<Series> {
        if volume.len() != close.len() {
            return None;
        }

        let close_diff = diff(&close.values, self.drift);
        let volume_diff = diff(&volume.values, self.drift);

        let values = close_diff
            .iter()
            .zip(volume_diff.iter())
            .map(|(c, v)| match (c, v) {
                (Some(c), Some(v)) => Some(rank(*c, *v)),
                _ => None,
            })
            .collect();

        Some(Series::new(self.name(), values).with_category(Category::Volume))
    }
}

impl Default for PVR {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn rank(close_diff: f64, volume_diff: f64) -> f64 {
    match (close_diff >= 0.0, volume_diff >= 0.0) {
        (true, true) => 1.0,
        (true, false) => 2.0,
        (false, true) => 3.0,
        (false, false) => 4.0,
    }
}
