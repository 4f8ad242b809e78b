use super::*;
use serde_json::json;

#[test]
fn empty_document_uses_defaults() {
    let def: SceneDef = serde_json::from_value(json!({})).unwrap();
    assert_eq!(def.settings(), RenderSettings::default());
    assert!(def.objects.is_empty());
    let built = def.build(Path::new(".")).unwrap();
    assert!(built.scene.is_empty());
    assert!((built.camera.vfov_deg() - 53.130_102_354_155_98).abs() < 1e-9);
}

#[test]
fn parses_all_material_kinds_and_color_forms() {
    let def: SceneDef = serde_json::from_value(json!({
        "render": { "width": 32, "height": 16, "samples_per_pixel": 2, "seed": 9 },
        "objects": [
            { "sphere": { "center": [0, 0, -1], "radius": 0.5,
                          "material": { "lambertian": { "albedo": "#007070" } } } },
            { "sphere": { "center": [1, 0, -1], "radius": 0.5,
                          "material": { "metal": { "albedo": [0.8, 0.8, 0.8], "fuzz": 0.1 } } } },
            { "sphere": { "center": [-1, 0, -1], "radius": 0.5,
                          "material": { "dielectric": { "refraction_index": 1.5 } } } }
        ]
    }))
    .unwrap();

    let settings = def.settings();
    assert_eq!((settings.width, settings.height), (32, 16));
    assert_eq!(settings.samples_per_pixel, 2);
    assert_eq!(settings.seed, 9);
    assert_eq!(settings.max_depth, RenderSettings::default().max_depth);

    match &def.objects[2] {
        ObjectDef::Sphere(SphereDef {
            material: MaterialDef::Dielectric { albedo, .. },
            ..
        }) => assert_eq!(*albedo, ColorDef([1.0, 1.0, 1.0])),
        other => panic!("unexpected object {other:?}"),
    }

    let built = def.build(Path::new(".")).unwrap();
    assert_eq!(built.scene.len(), 3);
    assert!((built.camera.aspect() - 2.0).abs() < 1e-12);
}

#[test]
fn rejects_unknown_fields_and_bad_colors() {
    assert!(serde_json::from_value::<SceneDef>(json!({ "camera": { "fov": 10 } })).is_err());
    assert!(
        serde_json::from_value::<ColorDef>(json!("#12")).is_err(),
        "short hex must be rejected"
    );
}

#[test]
fn validate_reports_bad_numbers() {
    let bad_radius: SceneDef = serde_json::from_value(json!({
        "objects": [{ "sphere": { "center": [0, 0, 0], "radius": -1,
                                  "material": { "lambertian": { "albedo": "#ffffff" } } } }]
    }))
    .unwrap();
    let err = bad_radius.validate().unwrap_err();
    assert!(err.to_string().contains("objects[0]"));

    let bad_size: SceneDef =
        serde_json::from_value(json!({ "render": { "width": 0 } })).unwrap();
    assert!(bad_size.validate().is_err());

    let bad_glass: SceneDef = serde_json::from_value(json!({
        "objects": [{ "sphere": { "center": [0, 0, 0], "radius": 1,
                                  "material": { "dielectric": { "refraction_index": 0 } } } }]
    }))
    .unwrap();
    assert!(bad_glass.validate().is_err());
}

#[test]
fn missing_texture_fails_at_build_not_validate() {
    let def: SceneDef = serde_json::from_value(json!({
        "objects": [{ "sphere": { "center": [0, 0, -1], "radius": 0.5,
                                  "material": { "texture": { "path": "nope.png" } } } }]
    }))
    .unwrap();
    assert!(def.validate().is_ok());
    let err = def.build(Path::new("/definitely/missing")).unwrap_err();
    assert!(err.to_string().contains("scene error:"));
}

#[test]
fn from_reader_wraps_parse_errors() {
    let err = SceneDef::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}
