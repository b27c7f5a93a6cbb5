use super::*;

const MINIMAL: &str = r#"{
    "canvas": {"width": 640, "height": 360},
    "fps": 24,
    "draw_budget_frames": 48,
    "shapes": [{"kind": "path", "d": "M0 0 L10 10"}]
}"#;

#[test]
fn minimal_scene_gets_defaults() {
    let s = SceneInput::from_json_str(MINIMAL).unwrap();
    assert_eq!(s.strategy, Strategy::Sequential);
    assert_eq!(s.fps, Fps::new(24, 1).unwrap());
    assert_eq!(s.source_size, None);
    assert_eq!(s.source_frame(), Size::new(640.0, 360.0));
    assert_eq!(s.config, EngineConfig::default());
    assert!(s.validate().is_ok());
}

#[test]
fn rational_fps_and_source_size_parse() {
    let s = SceneInput::from_json_str(
        r#"{"canvas":{"width":100,"height":100},"fps":{"num":30000,"den":1001},
            "draw_budget_frames":10,"strategy":"balanced",
            "source_size":{"width":50.0,"height":25.0},"shapes":[]}"#,
    )
    .unwrap();
    assert_eq!(s.strategy, Strategy::Balanced);
    assert_eq!(s.fps.den, 1001);
    assert_eq!(s.source_frame(), Size::new(50.0, 25.0));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneInput::from_json_str("{").unwrap_err();
    assert!(matches!(err, WhiteboardError::Serde(_)));
    let err = SceneInput::from_json_str(&MINIMAL.replace("\"fps\"", "\"speed\"")).unwrap_err();
    assert!(matches!(err, WhiteboardError::Serde(_)));
}

#[test]
fn validate_rejects_bad_parameters() {
    let base = SceneInput::from_json_str(MINIMAL).unwrap();

    let mut s = base.clone();
    s.canvas.width = 0;
    assert!(s.validate().is_err());

    let mut s = base.clone();
    s.fps.num = 0;
    assert!(s.validate().is_err());

    let mut s = base.clone();
    s.draw_budget_frames = MAX_DRAW_BUDGET_FRAMES + 1;
    assert!(s.validate().is_err());

    let mut s = base.clone();
    s.source_size = Some(Size::new(-1.0, 10.0));
    assert!(s.validate().is_err());

    let mut s = base;
    s.config.length.min_length = f64::NAN;
    assert!(s.validate().is_err());
}

#[test]
fn canonical_json_is_stable() {
    let a = SceneInput::from_json_str(MINIMAL).unwrap();
    let json = String::from_utf8(a.to_canonical_json().unwrap()).unwrap();
    let b = SceneInput::from_json_str(&json).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_canonical_json().unwrap(), b.to_canonical_json().unwrap());
}

#[test]
fn missing_file_is_reported() {
    assert!(SceneInput::from_path("/definitely/not/here.json").is_err());
}
