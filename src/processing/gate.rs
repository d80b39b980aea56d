// src/processing/gate.rs
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Sentinel-2 scene classification codes (SCL band).
pub mod scl {
    pub const NO_DATA: u8 = 0;
    pub const SATURATED_DEFECTIVE: u8 = 1;
    pub const DARK_AREA: u8 = 2;
    pub const CLOUD_SHADOW: u8 = 3;
    pub const VEGETATION: u8 = 4;
    pub const NOT_VEGETATED: u8 = 5;
    pub const WATER: u8 = 6;
    pub const UNCLASSIFIED: u8 = 7;
    pub const CLOUD_MEDIUM_PROBABILITY: u8 = 8;
    pub const CLOUD_HIGH_PROBABILITY: u8 = 9;
    pub const THIN_CIRRUS: u8 = 10;
    pub const SNOW_ICE: u8 = 11;
}

/// Per-product sample validity policy: each policy carries its own set of
/// excluded classification codes. The sets overlap but are tuned per
/// product family and stay independently selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GatePolicy {
    /// Gate of the maximum-NDVI composite: also rejects water, unclassified
    /// and dark-area pixels so they cannot win the fold.
    MaxComposite,
    /// Gate of the median/mean product family.
    Standard,
    /// Exclusion set of the oldest float composite product.
    Legacy,
}

impl GatePolicy {
    pub fn excluded(&self) -> &'static [u8] {
        use scl::*;
        match self {
            GatePolicy::MaxComposite => &[
                NO_DATA,
                SATURATED_DEFECTIVE,
                DARK_AREA,
                CLOUD_SHADOW,
                WATER,
                UNCLASSIFIED,
                CLOUD_MEDIUM_PROBABILITY,
                CLOUD_HIGH_PROBABILITY,
                THIN_CIRRUS,
            ],
            GatePolicy::Standard => &[
                NO_DATA,
                SATURATED_DEFECTIVE,
                CLOUD_MEDIUM_PROBABILITY,
                CLOUD_HIGH_PROBABILITY,
                THIN_CIRRUS,
            ],
            GatePolicy::Legacy => &[
                DARK_AREA,
                CLOUD_SHADOW,
                UNCLASSIFIED,
                CLOUD_MEDIUM_PROBABILITY,
                CLOUD_HIGH_PROBABILITY,
                THIN_CIRRUS,
            ],
        }
    }

    /// Total over all inputs: codes outside the exclusion set (including
    /// codes this crate has never heard of) are valid. When a data-presence
    /// flag is supplied it must be true as well.
    pub fn is_valid(&self, scl_code: u8, data_mask: Option<bool>) -> bool {
        data_mask.unwrap_or(true) && !self.excluded().contains(&scl_code)
    }
}
