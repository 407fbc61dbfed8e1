use super::*;

#[test]
fn normalize_rel_path_cases() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn extended_recipe_may_omit_fill_mask() {
    let recipe = Recipe::from_json_str(
        r#"{
            "container": "glass/body.png",
            "shadow_mask": "glass/shadow.png",
            "reflection_mask": "glass/reflection.png",
            "texture": "texture/latte.png"
        }"#,
    )
    .unwrap();
    assert_eq!(recipe.pipeline.variant, Variant::Extended);
    let roles: Vec<Role> = recipe.sources().unwrap().into_iter().map(|(r, _)| r).collect();
    assert_eq!(
        roles,
        vec![
            Role::Container,
            Role::Texture,
            Role::ShadowMask,
            Role::ReflectionMask
        ]
    );
}

#[test]
fn extended_recipe_requires_shadow_and_reflection() {
    let err = Recipe::from_json_str(
        r#"{"container":"c.png","fill_mask":"m.png","texture":"t.png"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("shadow_mask and reflection_mask"));
}

#[test]
fn basic_recipe_requires_fill_mask() {
    let err = Recipe::from_json_str(
        r#"{"pipeline":{"variant":"basic"},"container":"c.png","texture":"t.png"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("fill_mask"));

    let ok = Recipe::from_json_str(
        r#"{"pipeline":{"variant":"basic"},"container":"c.png","fill_mask":"m.png","texture":"t.png"}"#,
    )
    .unwrap();
    assert_eq!(ok.pipeline.size(), 256);
}

#[test]
fn recipe_rejects_missing_roles_and_escaping_paths() {
    let err = Recipe::from_json_str(r#"{"container":"c.png"}"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));

    let err = Recipe::from_json_str(
        r#"{"pipeline":{"variant":"basic"},"container":"../c.png","fill_mask":"m.png","texture":"t.png"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains(".."));
}

#[test]
fn role_names_match_recipe_fields() {
    assert_eq!(Role::FillMask.to_string(), "fill_mask");
    assert_eq!(Role::ReflectionMask.as_str(), "reflection_mask");
}

#[test]
fn missing_file_reports_role_and_path() {
    let recipe = Recipe::from_json_str(
        r#"{"pipeline":{"variant":"basic","size":4},"container":"nope/c.png","fill_mask":"nope/m.png","texture":"nope/t.png"}"#,
    )
    .unwrap();
    let root = AssetRoot::new(std::env::temp_dir().join("drinkmakr_store_missing_dir"));
    let err = root.load_inputs(&recipe).unwrap_err().to_string();
    assert!(err.contains("asset error:"));
    assert!(err.contains("nope/"));
}
