// src/processing/sample.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One observation of one pixel at one time step, as delivered by the
/// imagery platform: named band reflectances, the scene classification
/// code, and an optional data-presence flag (absent means present).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandSample {
    #[serde(default)]
    pub bands: HashMap<String, f64>,
    pub scl: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_mask: Option<bool>,
}

impl BandSample {
    pub fn new(bands: HashMap<String, f64>, scl: u8, data_mask: Option<bool>) -> Self {
        Self {
            bands,
            scl,
            data_mask,
        }
    }

    /// Sample without any band data, classification code only.
    pub fn classified(scl: u8) -> Self {
        Self {
            bands: HashMap::new(),
            scl,
            data_mask: None,
        }
    }

    pub fn band(&self, name: &str) -> Option<f64> {
        self.bands.get(name).copied()
    }
}

/// All observations of one pixel across the time window, in acquisition
/// order. May be empty.
pub type SampleStack = Vec<BandSample>;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// A sample passed the validity gate but lacks a band the active index
    /// requires. Substituting a default would corrupt the product, so this
    /// aborts the pixel.
    #[error("sample is missing required band {band:?}")]
    MissingBand { band: String },
}
