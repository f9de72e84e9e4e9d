//! Threshold-breach and cross-event signal columns.

use tau_types::{Frame, Series};

use crate::rolling::shift;

/// Options for the signal cross-detector.
///
/// Companion series are borrowed per call; `xserie_a` and then
/// `xserie_b` take precedence over `xserie` when present.
#[derive(Debug, Clone, Copy)]
pub struct SignalOptions<'a> {
    /// Upper threshold
    pub xa: f64,
    /// Lower threshold
    pub xb: f64,
    /// Companion series for cross detection
    pub xserie: Option<&'a Series>,
    /// Companion overriding `xserie`
    pub xserie_a: Option<&'a Series>,
    /// Companion overriding `xserie_a`
    pub xserie_b: Option<&'a Series>,
    /// Emit threshold cross columns instead of breach columns
    pub cross_values: bool,
    /// Emit companion cross columns
    pub cross_series: bool,
    /// Positional shift applied to every signal column
    pub offset: isize,
}

impl Default for SignalOptions<'_> {
    fn default() -> Self {
        Self {
            xa: 80.0,
            xb: 20.0,
            xserie: None,
            xserie_a: None,
            xserie_b: None,
            cross_values: false,
            cross_series: true,
            offset: 0,
        }
    }
}

impl SignalOptions<'_> {
    /// Resolves thresholds and flags from a raw parameter record.
    #[must_use]
    pub fn from_params(params: &tau_types::Params) -> Self {
        Self {
            xa: params.xa(),
            xb: params.xb(),
            xserie: None,
            xserie_a: None,
            xserie_b: None,
            cross_values: params.cross_values(),
            cross_series: params.cross_series(),
            offset: params.offset(),
        }
    }
}

/// Builds the signal columns for a finished indicator series.
///
/// Breach columns compare against the thresholds directly; cross
/// columns flag positions where the order of the compared quantities
/// flips between consecutive samples, with the first row always
/// false. All columns are 0/1 series and undefined inputs compare as
/// false. The offset is applied to each column after cross
/// computation.
#[must_use]
pub fn signals(indicator: &Series, options: &SignalOptions<'_>) -> Frame {
    let name = indicator.name.as_str();
    let values = indicator.values.as_slice();
    let len = values.len();
    let mut columns: Vec<Series> = Vec::new();

    if options.cross_values {
        for level in [options.xa, options.xb] {
            let level_series = vec![Some(level); len];
            let above = strictly_above(values, &level_series);
            let level_label = format_level(level);
            columns.push(Series::new(
                format!("{name}_XA_{level_label}"),
                cross_up(&above),
            ));
            columns.push(Series::new(
                format!("{name}_XB_{level_label}"),
                cross_down(&above),
            ));
        }
    } else {
        columns.push(Series::new(
            format!("{name}_A_{}", format_level(options.xa)),
            breach_above(values, options.xa),
        ));
        columns.push(Series::new(
            format!("{name}_B_{}", format_level(options.xb)),
            breach_below(values, options.xb),
        ));
    }

    if options.cross_series {
        let companion = options.xserie_b.or(options.xserie_a).or(options.xserie);
        if let Some(companion) = companion {
            if companion.len() == len {
                let above = strictly_above(values, &companion.values);
                columns.push(Series::new(
                    format!("{name}_XA_{}", companion.name),
                    cross_up(&above),
                ));
                columns.push(Series::new(
                    format!("{name}_XB_{}", companion.name),
                    cross_down(&above),
                ));
            } else {
                tracing::debug!(
                    indicator = name,
                    companion = companion.name,
                    "companion series length mismatch, skipping cross columns"
                );
            }
        }
    }

    if options.offset != 0 {
        for column in &mut columns {
            column.values = shift(&column.values, options.offset);
        }
    }

    collect_aligned(columns)
}

/// Assembles the indicator-first table for a signal entry point.
pub(crate) fn signal_table(indicator: Series, options: &SignalOptions<'_>) -> Option<Frame> {
    let table = signals(&indicator, options);
    let mut columns = vec![indicator];
    columns.extend(table.into_columns());
    Frame::from_columns(columns).ok()
}

fn collect_aligned(columns: Vec<Series>) -> Frame {
    let mut frame = Frame::new();
    for column in columns {
        // columns are derived from one source series, lengths agree
        if let Err(err) = frame.insert(column) {
            tracing::warn!("dropping misaligned signal column: {err}");
        }
    }
    frame
}

fn breach_above(values: &[Option<f64>], level: f64) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| match v {
            Some(x) if *x >= level => Some(1.0),
            _ => Some(0.0),
        })
        .collect()
}

fn breach_below(values: &[Option<f64>], level: f64) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| match v {
            Some(x) if *x <= level => Some(1.0),
            _ => Some(0.0),
        })
        .collect()
}

/// Pointwise strict `a > b`, false wherever either side is undefined.
fn strictly_above(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<bool> {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| matches!((x, y), (Some(x), Some(y)) if x > y))
        .collect()
}

fn cross_up(above: &[bool]) -> Vec<Option<f64>> {
    let mut out = vec![Some(0.0); above.len()];
    for i in 1..above.len() {
        if above[i] && !above[i - 1] {
            out[i] = Some(1.0);
        }
    }
    out
}

fn cross_down(above: &[bool]) -> Vec<Option<f64>> {
    let mut out = vec![Some(0.0); above.len()];
    for i in 1..above.len() {
        if !above[i] && above[i - 1] {
            out[i] = Some(1.0);
        }
    }
    out
}

/// Threshold label without a trailing `.0` for integral values.
fn format_level(level: f64) -> String {
    if level.is_finite() && level.fract() == 0.0 {
        format!("{}", level as i64)
    } else {
        format!("{level}")
    }
}
