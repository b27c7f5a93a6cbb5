use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WhiteboardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        WhiteboardError::import("x")
            .to_string()
            .contains("import error:")
    );
    assert!(
        WhiteboardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn path_data_error_reports_offset() {
    let err = WhiteboardError::from(PathDataError::new(7, "expected number"));
    let s = err.to_string();
    assert!(s.contains("byte 7"), "{s}");
    assert!(s.contains("expected number"), "{s}");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WhiteboardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
