// src/io/writer.rs
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::products::ProductSpec;
use crate::utils::quantize::{PixelCode, SampleType};

/// Output band registration as the platform expects it: identifier, band
/// list, sample type and the declared no-data value, followed by the
/// quantized pixel data.
#[derive(Serialize)]
struct ProductOutput<'a> {
    id: &'a str,
    bands: Vec<&'a str>,
    sample_type: SampleType,
    nodata_value: f64,
    width: usize,
    height: usize,
    data: &'a [PixelCode],
}

pub fn write_product<P: AsRef<Path>>(
    path: P,
    product: &ProductSpec,
    width: usize,
    height: usize,
    data: &[PixelCode],
) -> Result<()> {
    let output = ProductOutput {
        id: product.id,
        bands: vec![product.output_band],
        sample_type: product.sample_type,
        nodata_value: product.declared_nodata,
        width,
        height,
        data,
    };

    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, &output)?;
    Ok(())
}
