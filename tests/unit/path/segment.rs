use super::*;

fn measured(mut seg: Segment) -> Segment {
    seg.length = seg.chord_length();
    seg
}

#[test]
fn empty_segment_list_becomes_one_degenerate_line() {
    let p = ParsedPath::from_segments("p", Point::new(10.0, 10.0), vec![]);
    assert_eq!(p.segments.len(), 1);
    assert!(p.segments[0].is_degenerate());
    assert_eq!(p.total_length, 0.0);
    assert!(!p.is_closed);
    assert_eq!(p.point_at_length(5.0), Point::new(10.0, 10.0));
}

#[test]
fn bounding_y_uses_all_endpoints_not_start() {
    let start = Point::new(0.0, 50.0);
    let segs = vec![
        Segment::line(start, Point::new(10.0, 5.0)),
        Segment::line(Point::new(10.0, 5.0), Point::new(20.0, 80.0)),
    ];
    let p = ParsedPath::from_segments("p", start, segs);
    assert_eq!(p.bounding_top_y, 5.0);
    assert_eq!(p.bounding_bottom_y, 80.0);
    assert!(p.bounding_top_y <= p.bounding_bottom_y);
}

#[test]
fn returning_to_start_counts_as_closed() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    let c = Point::new(10.0, 10.0);
    let p = ParsedPath::from_segments(
        "tri",
        a,
        vec![Segment::line(a, b), Segment::line(b, c), Segment::line(c, a)],
    );
    assert!(p.is_closed);

    let open = ParsedPath::from_segments("open", a, vec![Segment::line(a, b)]);
    assert!(!open.is_closed);
}

#[test]
fn point_at_length_walks_measured_segments() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(100.0, 0.0);
    let c = Point::new(100.0, 50.0);
    let mut p = ParsedPath::from_segments(
        "p",
        a,
        vec![measured(Segment::line(a, b)), measured(Segment::line(b, c))],
    );
    p.recompute_total();
    assert_eq!(p.total_length, 150.0);
    assert_eq!(p.point_at_length(50.0), Point::new(50.0, 0.0));
    assert_eq!(p.point_at_length(125.0), Point::new(100.0, 25.0));
    assert_eq!(p.point_at_length(1_000.0), c);
}

#[test]
fn arc_point_at_hits_endpoints() {
    let from = Point::new(0.0, 0.0);
    let to = Point::new(100.0, 0.0);
    let seg = Segment::arc(
        from,
        to,
        ArcParams {
            radii: Vec2::new(50.0, 50.0),
            x_rotation_deg: 0.0,
            large_arc: false,
            sweep: true,
        },
    );
    let p0 = seg.point_at(0.0);
    let p1 = seg.point_at(1.0);
    assert!(p0.distance(from) < 1e-6, "{p0:?}");
    assert!(p1.distance(to) < 1e-6, "{p1:?}");
    // Half-way along a semicircle sits one radius away from the chord.
    let mid = seg.point_at(0.5);
    assert!((mid.y.abs() - 50.0).abs() < 1e-6, "{mid:?}");
}

#[test]
fn svg_path_data_uses_absolute_commands() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    let p = ParsedPath::from_segments(
        "p",
        a,
        vec![
            Segment::line(a, b),
            Segment::quadratic(b, Point::new(15.0, 5.0), Point::new(10.0, 10.0)),
            Segment::close(Point::new(10.0, 10.0), a),
        ],
    );
    assert_eq!(p.to_svg_path_data(), "M 0 0 L 10 0 Q 15 5 10 10 Z");
}

#[test]
fn bez_path_mirrors_segments() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    let c = Point::new(10.0, 10.0);
    let p = ParsedPath::from_segments(
        "p",
        a,
        vec![
            Segment::line(a, b),
            Segment::cubic(b, Point::new(12.0, 2.0), Point::new(12.0, 8.0), c),
            Segment::close(c, a),
        ],
    );
    let bez = p.to_bez_path();
    assert_eq!(bez.elements().len(), 4);
}
