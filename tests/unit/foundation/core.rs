use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange {
        start: FrameIndex(2),
        end: FrameIndex(5),
    };
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_empty_and_inverted_have_no_frames() {
    let empty = FrameRange {
        start: FrameIndex(3),
        end: FrameIndex(3),
    };
    assert!(empty.is_empty());
    assert!(!empty.contains(FrameIndex(3)));
    let inverted = FrameRange {
        start: FrameIndex(5),
        end: FrameIndex(2),
    };
    assert_eq!(inverted.len_frames(), 0);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_secs_to_frames_rounds_to_nearest() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(0.25), 8);
    assert_eq!(fps.secs_to_frames_round(1.0), 30);
    assert_eq!(fps.secs_to_frames_round(-1.0), 0);
    assert!((fps.frames_to_secs(45) - 1.5).abs() < 1e-12);
}

#[test]
fn fps_deserializes_from_integer_or_ratio() {
    let a: Fps = serde_json::from_str("30").unwrap();
    assert_eq!(a, Fps { num: 30, den: 1 });

    let b: Fps = serde_json::from_str(r#"{"num":30000,"den":1001}"#).unwrap();
    assert_eq!(b, Fps { num: 30000, den: 1001 });
}

#[test]
fn canvas_size_is_floating_point() {
    let c = Canvas {
        width: 1920,
        height: 1080,
    };
    assert_eq!(c.size(), Size::new(1920.0, 1080.0));
}
