// src/main.rs
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use orbit_calc::batch;
use orbit_calc::cli::{Cli, Commands};
use orbit_calc::io;
use orbit_calc::processing::ParallelProcessor;
use orbit_calc::products::ProductSpec;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Commands::Batch { config } = &cli.command {
        batch::process_batch(config, cli.threads)?;
        println!("Batch processing complete");
        return Ok(());
    }

    let product = match &cli.command {
        Commands::Ndvi { float, gate } => {
            if *float {
                ProductSpec::ndvi_max(*gate)
            } else {
                let mut product = ProductSpec::ndvi_median();
                if let Some(gate) = gate {
                    product.gate = *gate;
                }
                product
            }
        }
        Commands::Water => ProductSpec::water(),
        Commands::Naturalness => ProductSpec::naturalness(),
        Commands::Batch { .. } => unreachable!(),
    };

    let scene = io::read_scene(&cli.input)?;
    let processor = ParallelProcessor::new(cli.threads)?;
    let data = processor.process(&product, &scene.pixels)?;
    io::write_product(&cli.output, &product, scene.width, scene.height, &data)?;

    println!("Processing complete: {}", cli.output.display());
    Ok(())
}
