// src/processing/mod.rs
pub mod gate;
pub mod indices;
pub mod parallel;
pub mod pixel;
pub mod reducers;
pub mod sample;

// Re-export main components
pub use parallel::ParallelProcessor;
pub use sample::{BandSample, ProcessError, SampleStack};
