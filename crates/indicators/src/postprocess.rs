//! Uniform offset and fill stage applied to finished outputs.

use tau_types::FillMethod;

use crate::rolling::shift;

/// Applies the positional offset, then at most one fill strategy.
///
/// A literal `fillna` wins over `fill_method`; undefined entries no
/// strategy covers stay undefined.
#[must_use]
pub fn postprocess(
    values: Vec<Option<f64>>,
    offset: isize,
    fillna: Option<f64>,
    fill_method: Option<FillMethod>,
) -> Vec<Option<f64>> {
    let mut out = if offset != 0 {
        shift(&values, offset)
    } else {
        values
    };

    if let Some(fill) = fillna {
        for v in out.iter_mut() {
            if v.is_none() {
                *v = Some(fill);
            }
        }
    } else if let Some(method) = fill_method {
        apply_fill_method(&mut out, method);
    }

    out
}

fn apply_fill_method(values: &mut [Option<f64>], method: FillMethod) {
    match method {
        FillMethod::Ffill => {
            let mut last = None;
            for v in values.iter_mut() {
                match *v {
                    Some(x) => last = Some(x),
                    None => *v = last,
                }
            }
        }
        FillMethod::Bfill => {
            let mut next = None;
            for v in values.iter_mut().rev() {
                match *v {
                    Some(x) => next = Some(x),
                    None => *v = next,
                }
            }
        }
    }
}
