use super::*;

#[test]
fn duration_is_clamped_into_range() {
    assert_eq!(clamp_duration(0.1).unwrap(), MIN_SCENE_DURATION_S);
    assert_eq!(clamp_duration(42.0).unwrap(), MAX_SCENE_DURATION_S);
    assert_eq!(clamp_duration(3.5).unwrap(), 3.5);
    assert!(clamp_duration(f64::NAN).is_err());
    assert!(clamp_duration(f64::INFINITY).is_err());
}

#[test]
fn blank_scene_uses_defaults() {
    let s = Scene::blank(SceneId(4));
    assert_eq!(s.text, "");
    assert_eq!(s.duration, DEFAULT_SCENE_DURATION_S);
    assert_eq!(s.group_layout.scale, 1.0);
    assert!(s.word_layouts.is_empty());
    assert_eq!(s.decoration, SceneDecoration::None);
    s.validate().unwrap();
}

#[test]
fn orphaned_indices_are_reported_not_pruned() {
    let mut s = Scene::new(SceneId(1), "one two three", 2.0).unwrap();
    s.word_layouts.insert(0, WordOverride::default());
    s.word_layouts.insert(2, WordOverride::default());
    s.text = "one".to_owned();
    assert_eq!(s.orphaned_word_indices(), vec![2]);
    assert_eq!(s.word_layouts.len(), 2);
}

#[test]
fn update_replaces_one_field_and_clamps_duration() {
    let s = Scene::new(SceneId(1), "hello", 2.0).unwrap();
    let next = SceneUpdate::Duration(0.0).apply_to(&s).unwrap();
    assert_eq!(next.duration, MIN_SCENE_DURATION_S);
    assert_eq!(next.text, "hello");
    assert_eq!(s.duration, 2.0);
}

#[test]
fn update_rejects_degenerate_group_scale() {
    let s = Scene::blank(SceneId(1));
    let bad = GroupLayout {
        scale: 0.0,
        ..GroupLayout::default()
    };
    assert!(SceneUpdate::GroupLayout(bad).apply_to(&s).is_err());
}

#[test]
fn validate_rejects_out_of_range_duration_from_json() {
    let json = r#"{ "id": 1, "text": "x", "duration": 12.0 }"#;
    let s: Scene = serde_json::from_str(json).unwrap();
    assert!(s.validate().is_err());
}

#[test]
fn scene_update_json_is_field_tagged() {
    let u: SceneUpdate =
        serde_json::from_str(r#"{ "field": "text", "value": "new caption" }"#).unwrap();
    assert_eq!(u, SceneUpdate::Text("new caption".to_owned()));
    assert_eq!(u.field_name(), "text");
}

#[test]
fn background_image_round_trips_and_clears_on_blank() {
    let json = r#"{ "id": 3, "text": "x", "duration": 2.0, "background_image": "https://img/a.jpg" }"#;
    let s: Scene = serde_json::from_str(json).unwrap();
    assert_eq!(s.background_image.as_deref(), Some("https://img/a.jpg"));
    let back: Scene = serde_json::from_value(serde_json::to_value(&s).unwrap()).unwrap();
    assert_eq!(back, s);

    let plain = serde_json::to_value(Scene::blank(SceneId(1))).unwrap();
    assert!(plain.get("background_image").is_none());

    let u: SceneUpdate =
        serde_json::from_str(r#"{ "field": "background_image", "value": "https://img/b.jpg" }"#)
            .unwrap();
    assert_eq!(u.field_name(), "background_image");
    let next = u.apply_to(&s).unwrap();
    assert_eq!(next.background_image.as_deref(), Some("https://img/b.jpg"));

    let cleared = SceneUpdate::BackgroundImage(Some("  ".into()))
        .apply_to(&next)
        .unwrap();
    assert_eq!(cleared.background_image, None);
}

#[test]
fn word_override_skips_absent_fields() {
    let w = WordOverride {
        x: Some(3.0),
        ..WordOverride::default()
    };
    let v = serde_json::to_value(&w).unwrap();
    assert_eq!(v, serde_json::json!({ "x": 3.0 }));
    assert!(!w.is_empty());
    assert!(WordOverride::default().is_empty());
}

#[test]
fn aspect_ratio_canvas_sizes() {
    assert_eq!(AspectRatio::Portrait9x16.canvas().height, 1920);
    assert_eq!(AspectRatio::Landscape16x9.canvas().width, 1920);
    assert_eq!(AspectRatio::Square1x1.canvas().width, 1080);
}

#[test]
fn total_duration_is_derived_from_scenes() {
    let scenes = vec![
        Scene::new(SceneId(1), "a", 1.5).unwrap(),
        Scene::new(SceneId(2), "b", 3.0).unwrap(),
    ];
    assert_eq!(GlobalSettings::default().total_duration(&scenes), 4.5);
    assert_eq!(total_duration_ms(&scenes), 4500.0);
}
