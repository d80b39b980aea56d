// src/utils/quantize.rs
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Full-scale factor for the signed 16-bit index encoding (2^15 - 1).
pub const I16_SCALE: f64 = 32767.0;
/// Full-scale factor for the unsigned 16-bit encoding (2^16 - 1).
pub const U16_SCALE: f64 = 65535.0;
/// Full-scale factor for the unsigned 8-bit encoding (2^8 - 1).
pub const U8_SCALE: f64 = 255.0;

/// Declared numeric representation of an output band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SampleType {
    Float32,
    Int16,
    Uint16,
    Uint8,
}

/// One emitted pixel in the product's declared representation. Serialized
/// as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PixelCode {
    F32(f32),
    I16(i16),
    U16(u16),
    U8(u8),
}

impl Serialize for PixelCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PixelCode::F32(v) => serializer.serialize_f32(*v),
            PixelCode::I16(v) => serializer.serialize_i16(*v),
            PixelCode::U16(v) => serializer.serialize_u16(*v),
            PixelCode::U8(v) => serializer.serialize_u8(*v),
        }
    }
}

/// How a reduced value is mapped into the output representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuantScheme {
    /// Stored as-is, no clamping.
    Float32,
    /// round(value * 32767) for indices in [-1, 1]. No pre-clamp: the
    /// upstream index guarantees the range, and the float-to-int cast
    /// saturates at the width rather than wrapping.
    Int16Scaled,
    /// Floor-clamp negatives to 0, then round(value * 65535).
    Uint16Scaled,
    /// round(value) for values already in [0, 1] (water presence fraction).
    Uint8Direct,
    /// round(value * 255), the generic unit-interval byte encoding.
    Uint8Scaled,
}

/// Quantize one reduced value. Rounding is half-away-from-zero
/// (`f64::round`); tests pin exact codes per input.
pub fn quantize(value: f64, scheme: QuantScheme) -> PixelCode {
    match scheme {
        QuantScheme::Float32 => PixelCode::F32(value as f32),
        QuantScheme::Int16Scaled => PixelCode::I16((value * I16_SCALE).round() as i16),
        QuantScheme::Uint16Scaled => {
            let clamped = if value < 0.0 { 0.0 } else { value };
            PixelCode::U16((clamped * U16_SCALE).round() as u16)
        }
        QuantScheme::Uint8Direct => PixelCode::U8(value.round() as u8),
        QuantScheme::Uint8Scaled => PixelCode::U8((value * U8_SCALE).round() as u8),
    }
}
