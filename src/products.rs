// src/products.rs
use crate::processing::gate::GatePolicy;
use crate::processing::indices::{IndexKind, Ndvi};
use crate::processing::pixel::reduce_stack;
use crate::processing::reducers::Reduction;
use crate::processing::sample::{BandSample, ProcessError};
use crate::utils::quantize::{quantize, PixelCode, QuantScheme, SampleType};

/// One output product: which gate, index, temporal statistic and output
/// encoding apply, plus the band metadata the platform registers. These
/// are configuration values, not behavior subclasses, so each product's
/// policy stays independently auditable.
#[derive(Debug, Clone)]
pub struct ProductSpec {
    pub id: &'static str,
    pub output_band: &'static str,
    pub sample_type: SampleType,
    /// Code emitted when the pixel has no defined value.
    pub nodata: PixelCode,
    /// Sentinel declared to the platform in band metadata. Kept separate
    /// from `nodata` because the NATURALNESS band declares -999 on an
    /// unsigned type that cannot hold it.
    pub declared_nodata: f64,
    pub gate: GatePolicy,
    pub index: IndexKind,
    pub reduction: Reduction,
    pub scheme: QuantScheme,
}

impl ProductSpec {
    /// Legacy float maximum-NDVI composite. An all-invalid pixel emits the
    /// float no-data code.
    pub fn ndvi_max(gate: Option<GatePolicy>) -> Self {
        Self {
            id: "NDVI_MAX",
            output_band: "NDVI",
            sample_type: SampleType::Float32,
            nodata: PixelCode::F32(-999.0),
            declared_nodata: -999.0,
            gate: gate.unwrap_or(GatePolicy::Legacy),
            index: IndexKind::Vegetation(Ndvi::default().with_require_positive()),
            reduction: Reduction::Maximum,
            scheme: QuantScheme::Float32,
        }
    }

    /// Median NDVI composite quantized to int16.
    pub fn ndvi_median() -> Self {
        Self {
            id: "NDVI",
            output_band: "NDVI",
            sample_type: SampleType::Int16,
            nodata: PixelCode::I16(-999),
            declared_nodata: -999.0,
            gate: GatePolicy::Standard,
            index: IndexKind::Vegetation(Ndvi::default()),
            reduction: Reduction::Median,
            scheme: QuantScheme::Int16Scaled,
        }
    }

    /// Water presence fraction, rounded to 0/1 in a uint8 band. 255 is
    /// reserved for pixels the platform marks absent upstream; a normal
    /// reduction never produces it (the empty mean is 0).
    pub fn water() -> Self {
        Self {
            id: "WATER",
            output_band: "WATER",
            sample_type: SampleType::Uint8,
            nodata: PixelCode::U8(255),
            declared_nodata: 255.0,
            gate: GatePolicy::Standard,
            index: IndexKind::WaterPresence,
            reduction: Reduction::Mean,
            scheme: QuantScheme::Uint8Direct,
        }
    }

    /// Composite naturalness score: majority-water pixels score 1.0, the
    /// rest take the median vegetation index with water samples counted as
    /// 1.0. The declared -999 sentinel does not fit the unsigned band, so
    /// the emitted no-data code is its saturated value 0.
    pub fn naturalness() -> Self {
        Self {
            id: "NATURALNESS",
            output_band: "NATURALNESS",
            sample_type: SampleType::Uint16,
            nodata: PixelCode::U16(0),
            declared_nodata: -999.0,
            gate: GatePolicy::Standard,
            index: IndexKind::Vegetation(Ndvi::default().with_water_override()),
            reduction: Reduction::WaterMajority,
            scheme: QuantScheme::Uint16Scaled,
        }
    }

    /// Gate → index → reduce for one pixel's sample stack.
    pub fn evaluate(&self, samples: &[BandSample]) -> Result<Option<f64>, ProcessError> {
        reduce_stack(self.gate, &self.index, self.reduction, samples)
    }

    /// Quantize a reduced value, or substitute the product's no-data code.
    pub fn encode(&self, reduced: Option<f64>) -> PixelCode {
        match reduced {
            Some(value) => quantize(value, self.scheme),
            None => self.nodata,
        }
    }
}
