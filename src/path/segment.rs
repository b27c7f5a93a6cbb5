use std::fmt::Write as _;

use kurbo::ParamCurve as _;
use smallvec::{SmallVec, smallvec};

use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};

const DEGENERATE_EPS: f64 = 1e-9;
const ARC_TO_CUBIC_TOLERANCE: f64 = 0.1;

/// Kind of an atomic drawable segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Straight line.
    Line,
    /// Cubic Bézier with two control points.
    CubicCurve,
    /// Quadratic Bézier with one control point.
    QuadraticCurve,
    /// Elliptical arc in SVG endpoint parameterization.
    Arc,
    /// Synthetic straight line back to the sub-path start.
    Close,
}

/// Endpoint-parameterized elliptical arc data, as written in path data.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArcParams {
    /// Ellipse radii (absolute values).
    pub radii: Vec2,
    /// Rotation of the ellipse x-axis in degrees.
    pub x_rotation_deg: f64,
    /// SVG large-arc flag.
    pub large_arc: bool,
    /// SVG sweep flag.
    pub sweep: bool,
}

/// One atomic drawable unit of a path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Segment kind.
    pub kind: SegmentKind,
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Bézier control points (0 to 2, depending on kind).
    pub control_points: SmallVec<[Point; 2]>,
    /// Arc parameters, present only for [`SegmentKind::Arc`].
    pub arc: Option<ArcParams>,
    /// Estimated on-screen length; zero until measured.
    pub length: f64,
}

impl Segment {
    /// Straight line segment.
    pub fn line(from: Point, to: Point) -> Self {
        Self::with_kind(SegmentKind::Line, from, to, SmallVec::new(), None)
    }

    /// Cubic Bézier segment.
    pub fn cubic(from: Point, c1: Point, c2: Point, to: Point) -> Self {
        Self::with_kind(SegmentKind::CubicCurve, from, to, smallvec![c1, c2], None)
    }

    /// Quadratic Bézier segment.
    pub fn quadratic(from: Point, c: Point, to: Point) -> Self {
        Self::with_kind(SegmentKind::QuadraticCurve, from, to, smallvec![c], None)
    }

    /// Elliptical arc segment.
    pub fn arc(from: Point, to: Point, params: ArcParams) -> Self {
        Self::with_kind(SegmentKind::Arc, from, to, SmallVec::new(), Some(params))
    }

    /// Closing line back to the sub-path start.
    pub fn close(from: Point, to: Point) -> Self {
        Self::with_kind(SegmentKind::Close, from, to, SmallVec::new(), None)
    }

    fn with_kind(
        kind: SegmentKind,
        from: Point,
        to: Point,
        control_points: SmallVec<[Point; 2]>,
        arc: Option<ArcParams>,
    ) -> Self {
        Self {
            kind,
            from,
            to,
            control_points,
            arc,
            length: 0.0,
        }
    }

    /// Straight-line distance between the endpoints.
    pub fn chord_length(&self) -> f64 {
        self.from.distance(self.to)
    }

    /// Length of the polyline `from -> controls... -> to`.
    pub fn control_polygon_length(&self) -> f64 {
        let mut prev = self.from;
        let mut total = 0.0;
        for &p in self.control_points.iter().chain(std::iter::once(&self.to)) {
            total += prev.distance(p);
            prev = p;
        }
        total
    }

    /// `true` when every defining point coincides, so nothing would be drawn.
    pub fn is_degenerate(&self) -> bool {
        self.control_polygon_length() <= DEGENERATE_EPS
    }

    /// Point at curve parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        match self.kind {
            SegmentKind::Line | SegmentKind::Close => self.from.lerp(self.to, t),
            SegmentKind::CubicCurve => match self.control_points.as_slice() {
                [c1, c2] => kurbo::CubicBez::new(self.from, *c1, *c2, self.to).eval(t),
                _ => self.from.lerp(self.to, t),
            },
            SegmentKind::QuadraticCurve => match self.control_points.as_slice() {
                [c] => kurbo::QuadBez::new(self.from, *c, self.to).eval(t),
                _ => self.from.lerp(self.to, t),
            },
            SegmentKind::Arc => match self.kurbo_arc() {
                Some(arc) => {
                    let angle = arc.start_angle + arc.sweep_angle * t;
                    let (sin, cos) = angle.sin_cos();
                    let local = Point::new(arc.radii.x * cos, arc.radii.y * sin);
                    arc.center + (Affine::rotate(arc.x_rotation) * local).to_vec2()
                }
                None => self.from.lerp(self.to, t),
            },
        }
    }

    fn kurbo_arc(&self) -> Option<kurbo::Arc> {
        let params = self.arc?;
        let svg = kurbo::SvgArc {
            from: self.from,
            to: self.to,
            radii: params.radii,
            x_rotation: params.x_rotation_deg.to_radians(),
            large_arc: params.large_arc,
            sweep: params.sweep,
        };
        kurbo::Arc::from_svg_arc(&svg)
    }

    fn append_to(&self, path: &mut BezPath) {
        match self.kind {
            SegmentKind::Line => path.line_to(self.to),
            SegmentKind::Close => path.close_path(),
            SegmentKind::CubicCurve => match self.control_points.as_slice() {
                [c1, c2] => path.curve_to(*c1, *c2, self.to),
                _ => path.line_to(self.to),
            },
            SegmentKind::QuadraticCurve => match self.control_points.as_slice() {
                [c] => path.quad_to(*c, self.to),
                _ => path.line_to(self.to),
            },
            SegmentKind::Arc => match self.kurbo_arc() {
                Some(arc) => arc.to_cubic_beziers(ARC_TO_CUBIC_TOLERANCE, |p1, p2, p| {
                    path.curve_to(p1, p2, p);
                }),
                None => path.line_to(self.to),
            },
        }
    }

    fn write_svg(&self, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = match (self.kind, self.control_points.as_slice(), self.arc) {
            (SegmentKind::Close, _, _) => write!(out, " Z"),
            (SegmentKind::CubicCurve, [c1, c2], _) => write!(
                out,
                " C {} {} {} {} {} {}",
                c1.x, c1.y, c2.x, c2.y, self.to.x, self.to.y
            ),
            (SegmentKind::QuadraticCurve, [c], _) => {
                write!(out, " Q {} {} {} {}", c.x, c.y, self.to.x, self.to.y)
            }
            (SegmentKind::Arc, _, Some(a)) => write!(
                out,
                " A {} {} {} {} {} {} {}",
                a.radii.x,
                a.radii.y,
                a.x_rotation_deg,
                u8::from(a.large_arc),
                u8::from(a.sweep),
                self.to.x,
                self.to.y
            ),
            _ => write!(out, " L {} {}", self.to.x, self.to.y),
        };
    }
}

/// One independently drawable sub-shape: a maximal run of segments starting at a move.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParsedPath {
    /// Stable identifier, unique within a scene.
    pub id: String,
    /// Ordered segments.
    pub segments: Vec<Segment>,
    /// Sum of segment lengths.
    pub total_length: f64,
    /// Point of the opening move.
    pub start_point: Point,
    /// Minimum Y over all segment endpoints.
    pub bounding_top_y: f64,
    /// Maximum Y over all segment endpoints.
    pub bounding_bottom_y: f64,
    /// Whether the path returns to its start.
    pub is_closed: bool,
    /// Whether the source shape paints a fill that a renderer may reveal after the stroke.
    pub is_fill_like: bool,
}

impl ParsedPath {
    /// Build a path from parsed segments. A path with no segments receives one
    /// zero-length line so downstream code always sees at least one segment.
    pub fn from_segments(id: impl Into<String>, start: Point, mut segments: Vec<Segment>) -> Self {
        if segments.is_empty() {
            segments.push(Segment::line(start, start));
        }

        let mut top = start.y;
        let mut bottom = start.y;
        for s in &segments {
            top = top.min(s.from.y).min(s.to.y);
            bottom = bottom.max(s.from.y).max(s.to.y);
        }

        let has_close = segments.iter().any(|s| s.kind == SegmentKind::Close);
        let drawable = segments.iter().any(|s| !s.is_degenerate());
        let returns_home = segments
            .last()
            .is_some_and(|s| s.to.distance(start) <= 1e-6);

        let total_length = segments.iter().map(|s| s.length).sum();

        Self {
            id: id.into(),
            segments,
            total_length,
            start_point: start,
            bounding_top_y: top,
            bounding_bottom_y: bottom,
            is_closed: has_close || (drawable && returns_home),
            is_fill_like: false,
        }
    }

    /// Re-derive `total_length` after segment lengths change.
    pub(crate) fn recompute_total(&mut self) {
        self.total_length = self.segments.iter().map(|s| s.length).sum();
    }

    /// Axis-aligned bounds of the start point and all segment endpoints.
    pub fn bounds(&self) -> Rect {
        let mut r = Rect::from_points(self.start_point, self.start_point);
        for s in &self.segments {
            r = r.union_pt(s.from).union_pt(s.to);
        }
        r
    }

    /// Per-segment lengths in order.
    pub fn segment_lengths(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.length).collect()
    }

    /// End point of the last segment.
    pub fn end_point(&self) -> Point {
        self.segments.last().map_or(self.start_point, |s| s.to)
    }

    /// Point reached after drawing `distance` units along the measured segments.
    pub fn point_at_length(&self, distance: f64) -> Point {
        if self.total_length.is_nan() || self.total_length <= 0.0 || !distance.is_finite() {
            return self.start_point;
        }
        let mut remaining = distance.clamp(0.0, self.total_length);
        for s in &self.segments {
            if s.length <= 0.0 {
                continue;
            }
            if remaining <= s.length {
                return s.point_at(remaining / s.length);
            }
            remaining -= s.length;
        }
        self.end_point()
    }

    /// SVG path-data string with absolute commands.
    pub fn to_svg_path_data(&self) -> String {
        let mut out = format!("M {} {}", self.start_point.x, self.start_point.y);
        for s in &self.segments {
            s.write_svg(&mut out);
        }
        out
    }

    /// Geometry as a kurbo path (arcs approximated by cubics).
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start_point);
        for s in &self.segments {
            s.append_to(&mut path);
        }
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/segment.rs"]
mod tests;
