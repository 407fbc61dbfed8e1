use super::*;
use crate::composite::warp::WarpParams;

const FLAT: WarpParams = WarpParams {
    amplitude: 0.0,
    lift: 0,
};

fn solid(size: u32, px: [u8; 4]) -> ImageBuffer {
    ImageBuffer::filled(size, size, px).unwrap()
}

fn extended_inputs(size: u32) -> PipelineInputs {
    PipelineInputs {
        container: solid(size, [10, 10, 10, 255]),
        fill_mask: solid(size, [255, 255, 255, 255]),
        shadow_mask: Some(solid(size, [255, 255, 255, 255])),
        reflection_mask: Some(solid(size, [0, 0, 0, 255])),
        texture: solid(size, [120, 80, 40, 255]),
    }
}

#[test]
fn rejects_buffers_of_the_wrong_size() {
    let pipeline = Pipeline::new(PipelineConfig::new(Variant::Extended).with_size(8)).unwrap();
    let mut inputs = extended_inputs(8);
    inputs.texture = solid(4, [0, 0, 0, 255]);
    let err = pipeline.run(&inputs).unwrap_err().to_string();
    assert!(err.contains("texture must be 8x8"));
}

#[test]
fn extended_requires_both_masks() {
    let pipeline = Pipeline::new(PipelineConfig::new(Variant::Extended).with_size(8)).unwrap();

    let mut inputs = extended_inputs(8);
    inputs.shadow_mask = None;
    assert!(pipeline.run(&inputs).is_err());

    let mut inputs = extended_inputs(8);
    inputs.reflection_mask = None;
    assert!(pipeline.run_traced(&inputs).is_err());
}

#[test]
fn basic_runs_without_shadow_and_reflection() {
    let pipeline = Pipeline::new(PipelineConfig::new(Variant::Basic).with_size(8)).unwrap();
    let mut inputs = extended_inputs(8);
    inputs.shadow_mask = None;
    inputs.reflection_mask = None;
    let trace = pipeline.run_traced(&inputs).unwrap();
    assert!(trace.shaded.is_none());
    assert_eq!(trace.result.dimensions(), (8, 8));
}

#[test]
fn empty_fill_mask_leaves_container_untouched() {
    for variant in [Variant::Basic, Variant::Extended] {
        let pipeline = Pipeline::new(PipelineConfig::new(variant).with_size(8)).unwrap();
        let mut inputs = extended_inputs(8);
        inputs.fill_mask = ImageBuffer::new(8, 8).unwrap();
        inputs.reflection_mask = Some(ImageBuffer::new(8, 8).unwrap());

        let trace = pipeline.run_traced(&inputs).unwrap();
        assert!(trace.bbox.is_empty());
        assert!(trace.warped.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(trace.result, inputs.container);
    }
}

#[test]
fn extended_stage_order_is_crop_shadow_reflection_merge() {
    let cfg = PipelineConfig::new(Variant::Extended)
        .with_size(8)
        .with_warp(FLAT);
    let pipeline = Pipeline::new(cfg).unwrap();
    let inputs = extended_inputs(8);

    let trace = pipeline.run_traced(&inputs).unwrap();
    assert_eq!(
        trace.bbox,
        BoundingBox {
            x1: 0,
            x2: 7,
            y1: 0,
            y2: 7
        }
    );
    assert!(trace.shaded.is_some());

    for y in 0..8u32 {
        for x in 0..8u32 {
            let px = trace.result.pixel(x, y).unwrap();
            if x < 7 && y < 7 {
                assert_eq!(px, [120, 80, 40, 255], "({x},{y})");
            } else {
                // outside the cropped texture but inside the reflection alpha
                assert_eq!(px, [0, 0, 0, 255], "({x},{y})");
            }
        }
    }
}

#[test]
fn run_matches_traced_result_and_is_repeatable() {
    let pipeline = Pipeline::new(PipelineConfig::new(Variant::Extended).with_size(16)).unwrap();
    let mut inputs = extended_inputs(16);
    let mut mask = ImageBuffer::new(16, 16).unwrap();
    for y in 4..14 {
        for x in 3..13 {
            mask.set_pixel(x, y, [200, 220, 240, 255]);
        }
    }
    inputs.fill_mask = mask.clone();
    inputs.reflection_mask = Some(mask);

    let a = pipeline.run(&inputs).unwrap();
    let b = pipeline.run(&inputs).unwrap();
    let traced = pipeline.run_traced(&inputs).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, traced.result);
}

#[test]
fn compose_validates_config_first() {
    let inputs = extended_inputs(8);
    let bad = PipelineConfig::new(Variant::Extended).with_size(0);
    assert!(compose(bad, &inputs).is_err());
    compose(PipelineConfig::new(Variant::Extended).with_size(8), &inputs).unwrap();
}
