// src/processing/indices/water.rs
use crate::processing::gate::scl;

/// 1.0 iff the sample is classified as water, else 0.0. The temporal mean
/// of these indicators is the per-pixel water presence fraction.
pub fn water_indicator(scl_code: u8) -> f64 {
    if scl_code == scl::WATER {
        1.0
    } else {
        0.0
    }
}
