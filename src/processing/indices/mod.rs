// src/processing/indices/mod.rs
pub mod ndi;
pub mod water;

// Re-export indices
pub use ndi::{normalized_difference, Ndvi};
pub use water::water_indicator;

/// Which index function a product evaluates per valid sample.
#[derive(Debug, Clone)]
pub enum IndexKind {
    Vegetation(Ndvi),
    WaterPresence,
}
