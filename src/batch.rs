// src/batch.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::io;
use crate::processing::gate::GatePolicy;
use crate::processing::ParallelProcessor;
use crate::products::ProductSpec;

#[derive(Deserialize, Serialize, Debug)]
pub struct BatchConfig {
    /// Scene shared by every operation.
    pub input: PathBuf,
    #[serde(default)]
    pub global: GlobalParams,
    pub operations: Vec<Operation>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct GlobalParams {
    #[serde(default)]
    pub float: bool,
    #[serde(default)]
    pub gate: Option<GatePolicy>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Operation {
    #[serde(rename = "type")]
    pub op_type: String,
    pub output: PathBuf,
    pub float: Option<bool>,
    pub gate: Option<GatePolicy>,
}

pub fn process_batch(config_path: &Path, threads: Option<usize>) -> Result<()> {
    // Read and parse configuration file
    let config_content = fs::read_to_string(config_path)?;
    let config: BatchConfig = serde_json::from_str(&config_content)?;

    let scene = io::read_scene(&config.input)?;
    let processor = ParallelProcessor::new(threads)?;

    info!(
        operations = config.operations.len(),
        input = %config.input.display(),
        threads = processor.threads(),
        "starting batch processing"
    );

    for (i, op) in config.operations.iter().enumerate() {
        info!(
            "[{}/{}] Processing {} -> {}",
            i + 1,
            config.operations.len(),
            op.op_type,
            op.output.display()
        );

        // Operation-specific overrides on top of the global defaults
        let float = op.float.unwrap_or(config.global.float);
        let gate = op.gate.or(config.global.gate);

        let product = product_for(&op.op_type, float, gate)?;
        let data = processor.process(&product, &scene.pixels)?;
        io::write_product(&op.output, &product, scene.width, scene.height, &data)?;
    }

    Ok(())
}

fn product_for(op_type: &str, float: bool, gate: Option<GatePolicy>) -> Result<ProductSpec> {
    match op_type.to_lowercase().as_str() {
        "ndvi" => {
            if float {
                Ok(ProductSpec::ndvi_max(gate))
            } else {
                let mut product = ProductSpec::ndvi_median();
                if let Some(gate) = gate {
                    product.gate = gate;
                }
                Ok(product)
            }
        }
        "water" => {
            let mut product = ProductSpec::water();
            if let Some(gate) = gate {
                product.gate = gate;
            }
            Ok(product)
        }
        "naturalness" => {
            let mut product = ProductSpec::naturalness();
            if let Some(gate) = gate {
                product.gate = gate;
            }
            Ok(product)
        }
        other => Err(anyhow::anyhow!("Unknown product type: {}", other)),
    }
}
