// src/io/mod.rs
pub mod reader;
pub mod writer;

pub use reader::{read_scene, Scene};
pub use writer::write_product;
