// src/io/reader.rs
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::processing::sample::SampleStack;

/// A materialized time window of observations: one sample stack per pixel,
/// row-major. This is the in-memory form of what the imagery platform
/// delivers; alignment and temporal ordering are its guarantees, not ours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<SampleStack>,
}

impl Scene {
    pub fn validate(&self) -> Result<()> {
        let expected = self.width * self.height;
        if self.pixels.len() != expected {
            anyhow::bail!(
                "scene declares {}x{} = {} pixels but contains {}",
                self.width,
                self.height,
                expected,
                self.pixels.len()
            );
        }
        Ok(())
    }
}

pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let content = fs::read_to_string(path.as_ref())?;
    let scene: Scene = serde_json::from_str(&content)?;
    scene.validate()?;
    Ok(scene)
}
