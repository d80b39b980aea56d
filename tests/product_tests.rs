// tests/product_tests.rs
use std::collections::HashMap;
use std::fs;

use assert_approx_eq::assert_approx_eq;
use orbit_calc::batch::{self, BatchConfig};
use orbit_calc::io::{read_scene, write_product, Scene};
use orbit_calc::processing::gate::{scl, GatePolicy};
use orbit_calc::processing::sample::{BandSample, SampleStack};
use orbit_calc::processing::ParallelProcessor;
use orbit_calc::products::ProductSpec;
use orbit_calc::utils::quantize::PixelCode;

fn sample(scl_code: u8, nir: f64, red: f64) -> BandSample {
    let mut bands = HashMap::new();
    bands.insert("B08".to_string(), nir);
    bands.insert("B04".to_string(), red);
    BandSample::new(bands, scl_code, Some(true))
}

fn f32_code(code: PixelCode) -> f32 {
    match code {
        PixelCode::F32(v) => v,
        other => panic!("expected F32 code, got {:?}", other),
    }
}

/// Full naturalness pixel: three time steps, one excluded by the gate, the
/// remaining two split evenly between land and water. The exact-half water
/// fraction must resolve to the water branch and full scale.
#[test]
fn test_naturalness_majority_water_boundary() {
    let product = ProductSpec::naturalness();
    let stack = vec![
        sample(scl::VEGETATION, 0.5, 0.1),
        sample(scl::WATER, 0.4, 0.2),
        sample(scl::CLOUD_HIGH_PROBABILITY, 0.9, 0.9),
    ];

    let reduced = product.evaluate(&stack).unwrap();
    assert_eq!(reduced, Some(1.0));
    assert_eq!(product.encode(reduced), PixelCode::U16(65535));
}

#[test]
fn test_naturalness_minority_water_takes_median() {
    let product = ProductSpec::naturalness();
    // One water sample out of three: fraction 1/3 falls through to the
    // median of the index scalars, with the water sample counted as 1.0
    let stack = vec![
        sample(scl::VEGETATION, 0.5, 0.1),
        sample(scl::VEGETATION, 0.4, 0.2),
        sample(scl::WATER, 0.0, 0.0),
    ];

    let reduced = product.evaluate(&stack).unwrap().unwrap();
    assert_approx_eq!(reduced, 0.4 / 0.6, 1e-12);
    assert_eq!(product.encode(Some(reduced)), PixelCode::U16(43690));
}

#[test]
fn test_naturalness_all_invalid_emits_nodata() {
    let product = ProductSpec::naturalness();
    let stack = vec![
        sample(scl::CLOUD_HIGH_PROBABILITY, 0.9, 0.9),
        sample(scl::THIN_CIRRUS, 0.5, 0.5),
    ];

    let reduced = product.evaluate(&stack).unwrap();
    assert_eq!(reduced, None);
    assert_eq!(product.encode(reduced), PixelCode::U16(0));
}

#[test]
fn test_naturalness_respects_data_mask() {
    let product = ProductSpec::naturalness();
    // The water sample is flagged absent, so the pixel is land-only
    let mut masked = sample(scl::WATER, 0.3, 0.3);
    masked.data_mask = Some(false);
    let stack = vec![sample(scl::VEGETATION, 0.75, 0.25), masked];

    let reduced = product.evaluate(&stack).unwrap();
    assert_eq!(reduced, Some(0.5));
    assert_eq!(product.encode(reduced), PixelCode::U16(32768));
}

#[test]
fn test_ndvi_median_product() {
    let product = ProductSpec::ndvi_median();
    let stack = vec![
        sample(scl::VEGETATION, 0.75, 0.25), // 0.5
        sample(scl::VEGETATION, 0.5, 0.5),   // 0.0
        sample(scl::VEGETATION, 1.0, 0.0),   // 1.0
    ];

    let reduced = product.evaluate(&stack).unwrap();
    assert_eq!(reduced, Some(0.5));
    assert_eq!(product.encode(reduced), PixelCode::I16(16384));
}

#[test]
fn test_ndvi_median_all_invalid_emits_nodata() {
    let product = ProductSpec::ndvi_median();
    let stack = vec![
        sample(scl::NO_DATA, 0.0, 0.0),
        sample(scl::CLOUD_MEDIUM_PROBABILITY, 0.4, 0.4),
    ];

    assert_eq!(product.encode(product.evaluate(&stack).unwrap()), PixelCode::I16(-999));
}

#[test]
fn test_ndvi_max_product() {
    let product = ProductSpec::ndvi_max(None);
    let stack = vec![
        sample(scl::CLOUD_SHADOW, 0.9, 0.1),   // excluded by the legacy gate
        sample(scl::VEGETATION, 0.25, 0.75),   // -0.5
        sample(scl::NOT_VEGETATED, 0.5, 0.25), // 1/3
        sample(scl::VEGETATION, 0.0, 0.5),     // skipped, non-positive band
    ];

    let reduced = product.evaluate(&stack).unwrap().unwrap();
    assert_approx_eq!(reduced, 1.0 / 3.0, 1e-12);
    assert_approx_eq!(f32_code(product.encode(Some(reduced))) as f64, 1.0 / 3.0, 1e-6);
}

#[test]
fn test_ndvi_max_identity_hides_negative_maximum() {
    let product = ProductSpec::ndvi_max(None);
    // The fold seeds at 0, so an all-negative pixel reports 0 rather than
    // its true maximum.
    let stack = vec![sample(scl::VEGETATION, 0.25, 0.75)];
    assert_eq!(product.evaluate(&stack).unwrap(), Some(0.0));
}

#[test]
fn test_ndvi_max_all_invalid_emits_nodata() {
    let product = ProductSpec::ndvi_max(None);

    // Gate rejects everything
    let cloudy = vec![sample(scl::CLOUD_HIGH_PROBABILITY, 0.9, 0.1)];
    assert_eq!(product.encode(product.evaluate(&cloudy).unwrap()), PixelCode::F32(-999.0));

    // Gate passes but every sample is skipped by the positive-band rule
    let dark = vec![sample(scl::VEGETATION, 0.0, 0.0)];
    assert_eq!(product.encode(product.evaluate(&dark).unwrap()), PixelCode::F32(-999.0));
}

#[test]
fn test_ndvi_max_gate_override() {
    let product = ProductSpec::ndvi_max(Some(GatePolicy::MaxComposite));
    // Water passes the legacy gate but not the max-composite gate
    let stack = vec![sample(scl::WATER, 0.9, 0.1)];
    assert_eq!(product.evaluate(&stack).unwrap(), None);
}

#[test]
fn test_water_product() {
    let product = ProductSpec::water();
    let stack = vec![
        BandSample::classified(scl::WATER),
        BandSample::classified(scl::VEGETATION),
        BandSample::classified(scl::WATER),
        BandSample::classified(scl::CLOUD_HIGH_PROBABILITY),
    ];

    // Fraction 2/3 over the valid samples rounds to 1
    let reduced = product.evaluate(&stack).unwrap().unwrap();
    assert_approx_eq!(reduced, 2.0 / 3.0, 1e-12);
    assert_eq!(product.encode(Some(reduced)), PixelCode::U8(1));

    let land = vec![
        BandSample::classified(scl::VEGETATION),
        BandSample::classified(scl::NOT_VEGETATED),
    ];
    assert_eq!(product.encode(product.evaluate(&land).unwrap()), PixelCode::U8(0));
}

#[test]
fn test_water_all_invalid_is_zero_not_sentinel() {
    let product = ProductSpec::water();
    // The mean is defined as 0 over an empty sequence, so an all-cloud
    // pixel emits 0; 255 is reserved for upstream absence
    let stack = vec![
        BandSample::classified(scl::CLOUD_HIGH_PROBABILITY),
        BandSample::classified(scl::THIN_CIRRUS),
    ];
    assert_eq!(product.encode(product.evaluate(&stack).unwrap()), PixelCode::U8(0));
}

#[test]
fn test_water_needs_no_reflectance_bands() {
    // Classification-only samples are sufficient for the water product
    let product = ProductSpec::water();
    let stack = vec![BandSample::classified(scl::WATER)];
    assert_eq!(product.encode(product.evaluate(&stack).unwrap()), PixelCode::U8(1));
}

/// Deterministic synthetic pixel stack for parallel tests
fn synthetic_stack(i: usize) -> SampleStack {
    let codes = [
        scl::VEGETATION,
        scl::WATER,
        scl::CLOUD_HIGH_PROBABILITY,
        scl::NOT_VEGETATED,
    ];
    (0..(i % 5))
        .map(|t| {
            let nir = 0.1 + ((i + t) % 9) as f64 * 0.1;
            let red = 0.05 + (t % 7) as f64 * 0.1;
            sample(codes[(i + t) % codes.len()], nir, red)
        })
        .collect()
}

#[test]
fn test_parallel_determinism() {
    let pixels: Vec<SampleStack> = (0..10_000).map(synthetic_stack).collect();
    let product = ProductSpec::naturalness();

    let serial = ParallelProcessor::new(Some(1)).unwrap();
    let parallel = ParallelProcessor::new(Some(8)).unwrap();

    let a = serial.process(&product, &pixels).unwrap();
    let b = parallel.process(&product, &pixels).unwrap();
    assert_eq!(a.len(), pixels.len());
    assert_eq!(a, b);
}

#[test]
fn test_parallel_surfaces_missing_band() {
    let mut pixels: Vec<SampleStack> = (0..100).map(synthetic_stack).collect();
    // One gated sample without reflectance bands fails the whole job
    pixels[57] = vec![BandSample::classified(scl::VEGETATION)];

    let processor = ParallelProcessor::new(Some(4)).unwrap();
    let err = processor
        .process(&ProductSpec::ndvi_median(), &pixels)
        .unwrap_err();
    assert!(err.to_string().contains("B08"), "unexpected error: {}", err);
}

#[test]
fn test_scene_validation() {
    let scene = Scene {
        width: 2,
        height: 2,
        pixels: vec![vec![], vec![], vec![]],
    };
    assert!(scene.validate().is_err());
}

#[test]
fn test_scene_roundtrip_and_writer() {
    let dir = std::env::temp_dir().join(format!("orbit-calc-test-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let scene_path = dir.join("scene.json");
    let scene_json = r#"{
        "width": 2,
        "height": 1,
        "pixels": [
            [
                {"bands": {"B08": 0.75, "B04": 0.25}, "scl": 4, "data_mask": true},
                {"bands": {"B08": 0.9, "B04": 0.9}, "scl": 9}
            ],
            []
        ]
    }"#;
    fs::write(&scene_path, scene_json).unwrap();

    let scene = read_scene(&scene_path).unwrap();
    assert_eq!(scene.pixels.len(), 2);
    assert_eq!(scene.pixels[0][0].band("B08"), Some(0.75));
    assert_eq!(scene.pixels[0][1].data_mask, None);

    let product = ProductSpec::ndvi_median();
    let processor = ParallelProcessor::new(Some(2)).unwrap();
    let data = processor.process(&product, &scene.pixels).unwrap();
    assert_eq!(data, vec![PixelCode::I16(16384), PixelCode::I16(-999)]);

    let out_path = dir.join("ndvi.json");
    write_product(&out_path, &product, scene.width, scene.height, &data).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(written["id"], "NDVI");
    assert_eq!(written["bands"], serde_json::json!(["NDVI"]));
    assert_eq!(written["sample_type"], "INT16");
    assert_eq!(written["nodata_value"], -999.0);
    assert_eq!(written["data"], serde_json::json!([16384, -999]));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_batch_config_parsing() {
    let config_json = r#"{
        "input": "scene.json",
        "global": {"float": true, "gate": "max-composite"},
        "operations": [
            {"type": "ndvi", "output": "ndvi.json"},
            {"type": "water", "output": "water.json", "float": false},
            {"type": "naturalness", "output": "nat.json", "gate": "standard"}
        ]
    }"#;

    let config: BatchConfig = serde_json::from_str(config_json).unwrap();
    assert!(config.global.float);
    assert_eq!(config.global.gate, Some(GatePolicy::MaxComposite));
    assert_eq!(config.operations.len(), 3);
    assert_eq!(config.operations[1].float, Some(false));
    assert_eq!(config.operations[2].gate, Some(GatePolicy::Standard));
}

#[test]
fn test_batch_run_and_unknown_type() {
    let dir = std::env::temp_dir().join(format!("orbit-calc-batch-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let scene_path = dir.join("scene.json");
    let scene = Scene {
        width: 1,
        height: 1,
        pixels: vec![vec![sample(scl::WATER, 0.1, 0.2)]],
    };
    fs::write(&scene_path, serde_json::to_string(&scene).unwrap()).unwrap();

    let water_out = dir.join("water.json");
    let config_path = dir.join("batch.json");
    let config = serde_json::json!({
        "input": scene_path,
        "operations": [{"type": "water", "output": water_out}]
    });
    fs::write(&config_path, config.to_string()).unwrap();

    batch::process_batch(&config_path, Some(2)).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&water_out).unwrap()).unwrap();
    assert_eq!(written["data"], serde_json::json!([1]));

    // Unknown product types are rejected, not ignored
    let bad_config_path = dir.join("bad.json");
    let bad = serde_json::json!({
        "input": scene_path,
        "operations": [{"type": "albedo", "output": dir.join("x.json")}]
    });
    fs::write(&bad_config_path, bad.to_string()).unwrap();
    let err = batch::process_batch(&bad_config_path, Some(2)).unwrap_err();
    assert!(err.to_string().contains("albedo"));

    fs::remove_dir_all(&dir).ok();
}
