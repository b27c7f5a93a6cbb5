use super::*;

const DOC: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100">
  <g transform="translate(10 20)">
    <rect id="box" x="0" y="0" width="50" height="30" fill="#ff0000"/>
  </g>
  <path d="M0 0 L100 50" stroke="black" fill="none"/>
  <circle cx="150" cy="50" r="20" stroke="black" fill="none" visibility="hidden"/>
</svg>"##;

#[test]
fn import_extracts_visible_paths_with_baked_transforms() {
    let import = import_svg(DOC.as_bytes()).unwrap();
    assert_eq!(import.size, Size::new(200.0, 100.0));
    assert_eq!(import.shapes.len(), 2);

    let rect = &import.shapes[0];
    assert_eq!(rect.id.as_deref(), Some("box"));
    assert!(rect.has_fill());
    let paths = rect.to_paths(0).unwrap();
    assert_eq!(paths.len(), 1);
    let b = paths[0].bounds();
    assert!((b.x0 - 10.0).abs() < 1e-3, "{b:?}");
    assert!((b.y0 - 20.0).abs() < 1e-3, "{b:?}");
    assert!((b.x1 - 60.0).abs() < 1e-3, "{b:?}");
    assert!(paths[0].is_fill_like);

    let stroke = &import.shapes[1];
    assert!(!stroke.has_fill());
}

#[test]
fn malformed_document_is_an_import_error() {
    let err = import_svg(b"<svg").unwrap_err();
    assert!(matches!(err, WhiteboardError::Import(_)), "{err}");
}
