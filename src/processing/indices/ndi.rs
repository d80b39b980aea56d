// src/processing/indices/ndi.rs
use crate::processing::gate::scl;
use crate::processing::sample::{BandSample, ProcessError};

/// Normalized difference ratio (A-B)/(A+B).
///
/// A zero denominator yields 0, matching the platform's `index()` helper;
/// callers rely on the result never being NaN.
pub fn normalized_difference(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum == 0.0 {
        0.0
    } else {
        (a - b) / sum
    }
}

/// Vegetation index over a configurable band pair (near-infrared, red).
#[derive(Debug, Clone)]
pub struct Ndvi {
    nir_band: String,
    red_band: String,
    /// Skip samples whose reflectances are not strictly positive instead of
    /// indexing them (legacy composite behavior).
    require_positive: bool,
    /// Water-classified samples contribute the constant 1.0 instead of the
    /// band ratio (naturalness product).
    water_override: bool,
}

impl Ndvi {
    pub fn new(nir_band: Option<String>, red_band: Option<String>) -> Self {
        Self {
            nir_band: nir_band.unwrap_or_else(|| "B08".to_string()),
            red_band: red_band.unwrap_or_else(|| "B04".to_string()),
            require_positive: false,
            water_override: false,
        }
    }

    pub fn with_require_positive(mut self) -> Self {
        self.require_positive = true;
        self
    }

    pub fn with_water_override(mut self) -> Self {
        self.water_override = true;
        self
    }

    /// Scalar contribution of one gated sample, or `None` when the sample
    /// is skipped by the positive-band requirement. A missing band is a
    /// data error, never a silent default.
    pub fn scalar(&self, sample: &BandSample) -> Result<Option<f64>, ProcessError> {
        let nir = self.band_value(sample, &self.nir_band)?;
        let red = self.band_value(sample, &self.red_band)?;

        if self.require_positive && (nir <= 0.0 || red <= 0.0) {
            return Ok(None);
        }
        if self.water_override && sample.scl == scl::WATER {
            return Ok(Some(1.0));
        }
        Ok(Some(normalized_difference(nir, red)))
    }

    fn band_value(&self, sample: &BandSample, name: &str) -> Result<f64, ProcessError> {
        sample.band(name).ok_or_else(|| ProcessError::MissingBand {
            band: name.to_string(),
        })
    }

    pub fn required_bands(&self) -> [&str; 2] {
        [&self.nir_band, &self.red_band]
    }
}

impl Default for Ndvi {
    fn default() -> Self {
        Self::new(None, None)
    }
}
