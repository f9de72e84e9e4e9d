//! Relative Strength Index (RSI) indicator

use std::sync::Arc;

use tau_types::{Category, FillMethod, Frame, MaMode, Params, Series};

use crate::accel::{self, Backend};
use crate::ma::ma;
use crate::postprocess::postprocess;
use crate::rolling::{unsigned_differences, TieSide};
use crate::signals::{signal_table, SignalOptions};

/// Relative Strength Index
///
/// Smoothed upward movement over total smoothed movement, scaled to
/// `0..=scalar`. Wilder smoothing by default. When an accelerated
/// backend is registered and the config keeps the classic form
/// (drift 1, Wilder smoothing), computation delegates to it.
#[derive(Clone)]
pub struct RSI {
    /// Smoothing window
    pub length: usize,
    /// Difference lag
    pub drift: usize,
    /// Output scale
    pub scalar: f64,
    /// Smoothing mode
    pub mamode: MaMode,
    /// Post-processing shift
    pub offset: isize,
    /// Literal fill for undefined entries
    pub fillna: Option<f64>,
    /// Fill strategy when no literal is given
    pub fill_method: Option<FillMethod>,
    backend: Arc<dyn Backend>,
}

impl RSI {
    /// Creates an RSI config with the given window and the standard
    /// defaults.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length,
            drift: 1,
            scalar: 100.0,
            mamode: MaMode::Rma,
            offset: 0,
            fillna: None,
            fill_method: None,
            backend: accel::resolve(true),
        }
    }

    /// Resolves a raw parameter record against the RSI defaults.
    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            length: params.length_or(14),
            drift: params.drift(),
            scalar: params.scalar_or(100.0),
            mamode: params.mamode_or(MaMode::Rma),
            offset: params.offset(),
            fillna: params.fillna,
            fill_method: params.fill_method,
            backend: accel::resolve(params.accelerated()),
        }
    }

    /// Sets the difference lag.
    #[must_use]
    pub fn with_drift(mut self, drift: usize) -> Self {
        self.drift = drift;
        self
    }

    /// Sets the output scale.
    #[must_use]
    pub fn with_scalar(mut self, scalar: f64) -> Self {
        self.scalar = scalar;
        self
    }

    /// Sets the smoothing mode.
    #[must_use]
    pub fn with_mamode(mut self, mamode: MaMode) -> Self {
        self.mamode = mamode;
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

    /// Re-resolves the backend with the given delegation flag.
    #[must_use]
    pub fn with_accelerated(mut self, accelerated: bool) -> Self {
        self.backend = accel::resolve(accelerated);
        self
    }

    /// Output name encoding the window.
    #[must_use]
    pub fn name(&self) -> String {
        format!("RSI_{}", self.length)
    }

    /// Samples required before computation proceeds.
    #[must_use]
    pub fn min_periods(&self) -> usize {
        self.length
    }

    /// Computes the RSI over `close`.
    ///
    /// Returns `None` when the input is shorter than the smoothing
    /// window.
    #[must_use]
    pub fn compute(&self, close: &Series) -> Option<Series> {
        let close = close.verify(self.min_periods())?;

        let values = if self.classic_form() {
            self.backend.rsi(&close.values, self.length, self.scalar)
        } else {
            rsi_values(&close.values, self.length, self.scalar, self.drift, self.mamode)
        };

        let values = postprocess(values, self.offset, self.fillna, self.fill_method);
        Some(Series::new(self.name(), values).with_category(Category::Momentum))
    }

    /// Computes the RSI plus its signal columns, indicator first.
    #[must_use]
    pub fn compute_signals(&self, close: &Series, options: &SignalOptions<'_>) -> Option<Frame> {
        signal_table(self.compute(close)?, options)
    }

    /// Classic Wilder form, the shape external backends implement.
    fn classic_form(&self) -> bool {
        self.drift == 1 && self.mamode == MaMode::Rma
    }
}

impl std::fmt::Debug for RSI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RSI")
            .field("length", &self.length)
            .field("drift", &self.drift)
            .field("scalar", &self.scalar)
            .field("mamode", &self.mamode)
            .field("offset", &self.offset)
            .field("fillna", &self.fillna)
            .field("fill_method", &self.fill_method)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// RSI core: smoothed positive movement over total smoothed movement.
///
/// Both movement averages are non-negative by construction, so the
/// denominator is their plain sum. Ties in the difference split route
/// to the negative side. A zero denominator yields IEEE results,
/// unguarded.
pub(crate) fn rsi_values(
    values: &[Option<f64>],
    length: usize,
    scalar: f64,
    drift: usize,
    mamode: MaMode,
) -> Vec<Option<f64>> {
    let (positive, negative) = unsigned_differences(values, drift, TieSide::Negative);
    let positive_avg = ma(mamode, &positive, length);
    let negative_avg = ma(mamode, &negative, length);

    positive_avg
        .iter()
        .zip(negative_avg.iter())
        .map(|(p, n)| match (p, n) {
            (Some(p), Some(n)) => Some(scalar * p / (p + n)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_series(values: &[f64]) -> Series {
        Series::from_values("close", values.to_vec())
    }

    #[test]
    fn test_rsi_name_and_category() {
        let rsi = RSI::new(14);
        assert_eq!(rsi.name(), "RSI_14");

        let close = close_series(&[10.0; 20]);
        let out = rsi.compute(&close).unwrap();
        assert_eq!(out.name, "RSI_14");
        assert_eq!(out.category, Some(Category::Momentum));
        assert_eq!(out.len(), close.len());
    }

    #[test]
    fn test_rsi_insufficient_data_returns_none() {
        let close = close_series(&[1.0, 2.0, 3.0]);
        assert!(RSI::new(4).compute(&close).is_none());
        assert!(RSI::new(3).compute(&close).is_some());
    }

    #[test]
    fn test_rsi_reference_values() {
        // close = [10, 11, 12, 11, 13], length 3, Wilder smoothing
        let close = close_series(&[10.0, 11.0, 12.0, 11.0, 13.0]);
        let out = RSI::new(3).compute(&close).unwrap();

        assert!(out.values[0].is_none());
        assert!(out.values[1].is_none());
        assert!((out.values[2].unwrap() - 75.0).abs() < 1e-10);
        assert!((out.values[3].unwrap() - 600.0 / 11.0).abs() < 1e-10);
        assert!((out.values[4].unwrap() - 75.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_close_sits_at_midline() {
        let close = close_series(&[42.0; 20]);
        let out = RSI::new(14).compute(&close).unwrap();
        for v in out.values.iter().flatten() {
            assert!((v - 50.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_rsi_monotonic_close_approaches_scale() {
        let close = close_series(&(1..=60).map(f64::from).collect::<Vec<_>>());
        let out = RSI::new(5).compute(&close).unwrap();
        let last = out.values.last().copied().flatten().unwrap();
        assert!(last > 99.9, "last = {last}");
        assert!(last <= 100.0 + 1e-10);
    }

    #[test]
    fn test_rsi_respects_scalar() {
        let close = close_series(&(1..=40).map(f64::from).collect::<Vec<_>>());
        let out = RSI::new(5).with_scalar(10.0).compute(&close).unwrap();
        for v in out.values.iter().flatten() {
            assert!((0.0..=10.0 + 1e-10).contains(v));
        }
    }

    #[test]
    fn test_rsi_classic_matches_general_kernel() {
        let close: Vec<Option<f64>> =
            [10.0, 12.0, 11.0, 13.0, 12.5, 14.0, 13.0, 15.0].iter().map(|v| Some(*v)).collect();
        let via_backend = accel::Native.rsi(&close, 3, 100.0);
        let via_kernel = rsi_values(&close, 3, 100.0, 1, MaMode::Rma);
        assert_eq!(via_backend, via_kernel);
    }

    #[test]
    fn test_rsi_non_classic_path() {
        let close = close_series(&[10.0, 11.0, 12.0, 11.0, 13.0, 12.0, 14.0]);
        let out = RSI::new(3).with_mamode(MaMode::Sma).compute(&close).unwrap();
        // sma over [1, 1, 1] and [1, 0, 0] at index 2
        assert!((out.values[2].unwrap() - 75.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_offset_and_fill() {
        let close = close_series(&[10.0, 11.0, 12.0, 11.0, 13.0]);
        let plain = RSI::new(3).compute(&close).unwrap();
        let shifted = RSI::new(3).with_offset(1).compute(&close).unwrap();
        assert_eq!(shifted.values[3], plain.values[2]);
        assert!(shifted.values[0].is_none());

        let filled = RSI::new(3).with_fillna(0.0).compute(&close).unwrap();
        assert_eq!(filled.values[0], Some(0.0));
        assert_eq!(filled.values[1], Some(0.0));
    }

    #[test]
    fn test_rsi_from_params_applies_defaults_and_fallbacks() {
        let rsi = RSI::from_params(&Params::default());
        assert_eq!(rsi.length, 14);
        assert_eq!(rsi.drift, 1);
        assert_eq!(rsi.mamode, MaMode::Rma);

        let rsi = RSI::from_params(&Params {
            length: Some(-7),
            mamode: Some("nope".to_string()),
            ..Params::default()
        });
        assert_eq!(rsi.length, 14);
        // Unrecognized mode name lands on the dispatcher fallback.
        assert_eq!(rsi.mamode, MaMode::Sma);
    }

    #[test]
    fn test_rsi_signal_table_breach_columns() {
        let close = close_series(&(1..=20).map(f64::from).collect::<Vec<_>>());
        let rsi = RSI::new(14);
        let frame = rsi
            .compute_signals(&close, &SignalOptions::default())
            .unwrap();

        assert_eq!(frame.names(), vec!["RSI_14", "RSI_14_A_80", "RSI_14_B_20"]);
        assert_eq!(frame.len(), close.len());
    }
}
