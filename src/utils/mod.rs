// src/utils/mod.rs
pub mod quantize;
