use super::*;

#[test]
fn variant_defaults() {
    assert_eq!(Variant::default(), Variant::Extended);
    assert_eq!(PipelineConfig::new(Variant::Basic).size(), 256);
    assert_eq!(PipelineConfig::new(Variant::Extended).size(), 512);
    assert_eq!(PipelineConfig::new(Variant::Basic).warp(), WarpParams::BASIC);
    assert_eq!(
        PipelineConfig::new(Variant::Extended).warp(),
        WarpParams::EXTENDED
    );
}

#[test]
fn json_variant_names_are_lowercase() {
    let cfg = PipelineConfig::from_json_str(r#"{"variant":"basic"}"#).unwrap();
    assert_eq!(cfg.variant, Variant::Basic);
    assert!(PipelineConfig::from_json_str(r#"{"variant":"Basic"}"#).is_err());
    assert_eq!(
        serde_json::to_string(&PipelineConfig::new(Variant::Extended)).unwrap(),
        r#"{"variant":"extended"}"#
    );
}

#[test]
fn json_overrides_size_and_warp() {
    let cfg = PipelineConfig::from_json_str(
        r#"{"variant":"extended","size":64,"warp":{"amplitude":8.0,"lift":4}}"#,
    )
    .unwrap();
    assert_eq!(cfg.size(), 64);
    assert_eq!(
        cfg.warp(),
        WarpParams {
            amplitude: 8.0,
            lift: 4
        }
    );
}

#[test]
fn json_rejects_bad_variant_and_zero_size() {
    let err = PipelineConfig::from_json_str(r#"{"variant":"huge"}"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));

    let err = PipelineConfig::from_json_str(r#"{"size":0}"#).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn variant_display_matches_serde_names() {
    assert_eq!(Variant::Basic.to_string(), "basic");
    assert_eq!(Variant::Extended.to_string(), "extended");
    assert!(Variant::Extended.uses_shadow_and_reflection());
    assert!(!Variant::Basic.uses_shadow_and_reflection());
}
