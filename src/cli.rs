// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::processing::gate::GatePolicy;

#[derive(Parser)]
#[command(name = "orbit-calc")]
#[command(about = "Temporal compositing calculator for spectral indices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Input scene file (per-pixel sample stacks)
    #[arg(short, long, default_value = "scene.json", global = true)]
    pub input: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = "output.json", global = true)]
    pub output: PathBuf,

    /// Worker threads (defaults to available cores)
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Vegetation index composite: median into int16, or legacy float
    /// maximum with --float
    Ndvi {
        /// Emit the legacy float32 maximum composite instead of the
        /// int16 median
        #[arg(long)]
        float: bool,

        /// Override the sample validity gate
        #[arg(long, value_enum)]
        gate: Option<GatePolicy>,
    },

    /// Water presence fraction (uint8, 0/1 per pixel)
    Water,

    /// Composite naturalness score (uint16)
    Naturalness,

    /// Run multiple products from a JSON configuration file
    Batch {
        /// Batch configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}
