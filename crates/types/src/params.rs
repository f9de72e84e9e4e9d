//! Raw parameter record and resolution rules.
//!
//! Indicator configs accept an all-optional [`Params`] record and
//! resolve it against their own defaults once at construction.
//! Resolution is total: a present but invalid value silently degrades
//! to the default (with a debug-level trace event), it never fails.

use serde::{Deserialize, Serialize};

/// Moving-average mode selected by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaMode {
    /// Unweighted rolling mean
    #[default]
    Sma,
    /// Exponential, alpha = 2 / (length + 1)
    Ema,
    /// Wilder smoothing, alpha = 1 / length
    Rma,
    /// Linearly weighted rolling mean
    Wma,
}

/// Error parsing a moving-average mode name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseMaModeError;

impl std::fmt::Display for ParseMaModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unrecognized moving-average mode")
    }
}

impl std::error::Error for ParseMaModeError {}

impl std::str::FromStr for MaMode {
    type Err = ParseMaModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sma" => Ok(MaMode::Sma),
            "ema" => Ok(MaMode::Ema),
            "rma" => Ok(MaMode::Rma),
            "wma" => Ok(MaMode::Wma),
            _ => Err(ParseMaModeError),
        }
    }
}

impl MaMode {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MaMode::Sma => "sma",
            MaMode::Ema => "ema",
            MaMode::Rma => "rma",
            MaMode::Wma => "wma",
        }
    }
}

/// Fill strategy for undefined entries after the offset shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMethod {
    /// Propagate the last defined value forward
    Ffill,
    /// Propagate the next defined value backward
    Bfill,
}

impl FillMethod {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FillMethod::Ffill => "ffill",
            FillMethod::Bfill => "bfill",
        }
    }
}

/// Raw per-call parameter record.
///
/// Every recognized option is an explicit field; absent fields take
/// the indicator-specific default during resolution. The `mamode`
/// field stays a free string so that unrecognized names degrade to the
/// default rather than failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Window length
    pub length: Option<i64>,
    /// Difference lag
    pub drift: Option<i64>,
    /// Post-processing shift
    pub offset: Option<i64>,
    /// Oscillator scale factor
    pub scalar: Option<f64>,
    /// Moving-average mode name
    pub mamode: Option<String>,
    /// Literal fill for undefined entries
    pub fillna: Option<f64>,
    /// Fill strategy when no literal is given
    pub fill_method: Option<FillMethod>,
    /// Delegate to a registered accelerated backend
    pub accelerated: Option<bool>,
    /// Percent return: measure from the first sample
    pub cumulative: Option<bool>,
    /// RVI: average the high and low variants
    pub refined: Option<bool>,
    /// RVI: average the high, low and close variants
    pub thirds: Option<bool>,
    /// Request the signal-table entry point
    pub signal_indicators: Option<bool>,
    /// Upper signal threshold
    pub xa: Option<f64>,
    /// Lower signal threshold
    pub xb: Option<f64>,
    /// Emit threshold cross columns instead of breach columns
    pub cross_values: Option<bool>,
    /// Emit companion series cross columns
    pub cross_series: Option<bool>,
}

impl Params {
    /// Window length, `default` when absent or not positive.
    #[must_use]
    pub fn length_or(&self, default: usize) -> usize {
        resolve("length", self.length, default as i64, |v| v > 0) as usize
    }

    /// Difference lag, 1 when absent or not positive.
    #[must_use]
    pub fn drift(&self) -> usize {
        resolve("drift", self.drift, 1, |v| v > 0) as usize
    }

    /// Post-processing shift, 0 when absent. Any integer is valid.
    #[must_use]
    pub fn offset(&self) -> isize {
        self.offset.unwrap_or(0) as isize
    }

    /// Scale factor, `default` when absent, non-finite or not positive.
    #[must_use]
    pub fn scalar_or(&self, default: f64) -> f64 {
        resolve("scalar", self.scalar, default, |v| v.is_finite() && v > 0.0)
    }

    /// Moving-average mode, `default` when absent.
    ///
    /// A present but unrecognized name falls back to the simple mean,
    /// not to `default`.
    #[must_use]
    pub fn mamode_or(&self, default: MaMode) -> MaMode {
        match self.mamode.as_deref() {
            None => default,
            Some(s) => s.parse().unwrap_or_else(|_| {
                tracing::debug!(
                    mamode = s,
                    "unrecognized moving-average mode, falling back to simple"
                );
                MaMode::Sma
            }),
        }
    }

    /// Upper signal threshold, 80 when absent or non-finite.
    #[must_use]
    pub fn xa(&self) -> f64 {
        resolve("xa", self.xa, 80.0, f64::is_finite)
    }

    /// Lower signal threshold, 20 when absent or non-finite.
    #[must_use]
    pub fn xb(&self) -> f64 {
        resolve("xb", self.xb, 20.0, f64::is_finite)
    }

    /// Accelerated-backend delegation flag, on when absent.
    #[must_use]
    pub fn accelerated(&self) -> bool {
        self.accelerated.unwrap_or(true)
    }

    /// Cumulative percent-return flag, off when absent.
    #[must_use]
    pub fn cumulative(&self) -> bool {
        self.cumulative.unwrap_or(false)
    }

    /// RVI refined mode, off when absent.
    #[must_use]
    pub fn refined(&self) -> bool {
        self.refined.unwrap_or(false)
    }

    /// RVI thirds mode, off when absent.
    #[must_use]
    pub fn thirds(&self) -> bool {
        self.thirds.unwrap_or(false)
    }

    /// Signal-table request flag, off when absent.
    #[must_use]
    pub fn signal_indicators(&self) -> bool {
        self.signal_indicators.unwrap_or(false)
    }

    /// Threshold cross columns flag, off when absent.
    #[must_use]
    pub fn cross_values(&self) -> bool {
        self.cross_values.unwrap_or(false)
    }

    /// Companion cross columns flag, on when absent.
    #[must_use]
    pub fn cross_series(&self) -> bool {
        self.cross_series.unwrap_or(true)
    }
}

/// Resolves a raw value against a validity predicate.
///
/// Present and valid wins; anything else degrades to the default.
fn resolve<T>(name: &str, raw: Option<T>, default: T, valid: impl Fn(T) -> bool) -> T
where
    T: Copy + std::fmt::Debug,
{
    match raw {
        None => default,
        Some(v) if valid(v) => v,
        Some(v) => {
            tracing::debug!(param = name, value = ?v, "invalid parameter value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mamode_from_str() {
        use std::str::FromStr;
        assert_eq!(MaMode::from_str("sma"), Ok(MaMode::Sma));
        assert_eq!(MaMode::from_str("RMA"), Ok(MaMode::Rma));
        assert_eq!(MaMode::from_str("Wma"), Ok(MaMode::Wma));
        assert!(MaMode::from_str("hull").is_err());
    }

    #[test]
    fn test_defaults_on_empty_record() {
        let params = Params::default();
        assert_eq!(params.length_or(14), 14);
        assert_eq!(params.drift(), 1);
        assert_eq!(params.offset(), 0);
        assert!((params.scalar_or(100.0) - 100.0).abs() < 1e-10);
        assert_eq!(params.mamode_or(MaMode::Rma), MaMode::Rma);
        assert!((params.xa() - 80.0).abs() < 1e-10);
        assert!((params.xb() - 20.0).abs() < 1e-10);
        assert!(params.accelerated());
        assert!(!params.cumulative());
        assert!(!params.signal_indicators());
        assert!(!params.cross_values());
        assert!(params.cross_series());
    }

    #[test]
    fn test_invalid_values_fall_back_silently() {
        let params = Params {
            length: Some(-3),
            drift: Some(0),
            scalar: Some(f64::NAN),
            mamode: Some("hull".to_string()),
            xa: Some(f64::INFINITY),
            ..Params::default()
        };
        assert_eq!(params.length_or(14), 14);
        assert_eq!(params.drift(), 1);
        assert!((params.scalar_or(100.0) - 100.0).abs() < 1e-10);
        assert!((params.xa() - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_unrecognized_mamode_falls_back_to_simple() {
        let params = Params {
            mamode: Some("hull".to_string()),
            ..Params::default()
        };
        // Not the caller's default: an unrecognized name lands on the
        // dispatcher fallback.
        assert_eq!(params.mamode_or(MaMode::Rma), MaMode::Sma);
    }

    #[test]
    fn test_valid_values_win() {
        let params = Params {
            length: Some(21),
            drift: Some(3),
            offset: Some(-2),
            scalar: Some(50.0),
            mamode: Some("ema".to_string()),
            ..Params::default()
        };
        assert_eq!(params.length_or(14), 21);
        assert_eq!(params.drift(), 3);
        assert_eq!(params.offset(), -2);
        assert!((params.scalar_or(100.0) - 50.0).abs() < 1e-10);
        assert_eq!(params.mamode_or(MaMode::Rma), MaMode::Ema);
    }

    #[test]
    fn test_partial_json_deserializes_with_defaults() {
        let params: Params = serde_json::from_str(r#"{"length": 10, "mamode": "wma"}"#).unwrap();
        assert_eq!(params.length, Some(10));
        assert_eq!(params.mamode_or(MaMode::Sma), MaMode::Wma);
        assert!(params.drift.is_none());
        assert!(params.fill_method.is_none());
    }

    #[test]
    fn test_fill_method_serde() {
        let params: Params = serde_json::from_str(r#"{"fill_method": "ffill"}"#).unwrap();
        assert_eq!(params.fill_method, Some(FillMethod::Ffill));
        assert_eq!(FillMethod::Bfill.as_str(), "bfill");
    }
}
