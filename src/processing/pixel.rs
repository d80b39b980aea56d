// src/processing/pixel.rs
use crate::processing::gate::GatePolicy;
use crate::processing::indices::{water_indicator, IndexKind};
use crate::processing::reducers::{self, Reduction};
use crate::processing::sample::{BandSample, ProcessError};

/// Reduce one pixel's sample stack to a single value: gate the samples,
/// compute the per-sample index scalars, then apply the temporal statistic.
///
/// `Ok(None)` means the pixel has no defined value (all samples invalid for
/// a statistic that needs at least one observation); the product layer maps
/// it to the declared no-data code. The whole path is a pure function of
/// the stack, so results are identical across runs and thread counts.
pub fn reduce_stack(
    gate: GatePolicy,
    index: &IndexKind,
    reduction: Reduction,
    samples: &[BandSample],
) -> Result<Option<f64>, ProcessError> {
    let valid: Vec<&BandSample> = samples
        .iter()
        .filter(|s| gate.is_valid(s.scl, s.data_mask))
        .collect();

    let scalars = index_scalars(index, &valid)?;

    let reduced = match reduction {
        Reduction::Maximum => {
            if scalars.is_empty() {
                None
            } else {
                Some(reducers::fold_max(&scalars))
            }
        }
        // mean is defined as 0 over an empty sequence, so the all-invalid
        // pixel still gets a value here
        Reduction::Mean => Some(reducers::mean(&scalars)),
        Reduction::Median => reducers::median(&scalars),
        Reduction::WaterMajority => {
            if valid.is_empty() {
                None
            } else {
                let indicators: Vec<f64> =
                    valid.iter().map(|s| water_indicator(s.scl)).collect();
                // >= is deliberate: a pixel that is water exactly half the
                // time resolves to the water branch
                if reducers::mean(&indicators) >= 0.5 {
                    Some(1.0)
                } else {
                    reducers::median(&scalars)
                }
            }
        }
    };

    Ok(reduced)
}

fn index_scalars(index: &IndexKind, valid: &[&BandSample]) -> Result<Vec<f64>, ProcessError> {
    match index {
        IndexKind::Vegetation(ndvi) => {
            let mut scalars = Vec::with_capacity(valid.len());
            for sample in valid {
                if let Some(value) = ndvi.scalar(sample)? {
                    scalars.push(value);
                }
            }
            Ok(scalars)
        }
        IndexKind::WaterPresence => {
            Ok(valid.iter().map(|s| water_indicator(s.scl)).collect())
        }
    }
}
