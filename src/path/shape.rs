use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::PathDataError;
use crate::path::parser::try_parse_path_data;
use crate::path::segment::{ArcParams, ParsedPath, Segment};

/// One source shape of a vector image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeDef {
    /// Optional author-facing identifier; defaults to the shape's index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Fill paint as written in the source (`"none"` and `"transparent"` mean no fill).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Shape geometry.
    #[serde(flatten)]
    pub geometry: ShapeGeometry,
}

/// Geometry of a source shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeGeometry {
    /// Path mini-language data.
    Path {
        /// Path data string.
        d: String,
    },
    /// Axis-aligned rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// Circle.
    Circle {
        /// Center X.
        cx: f64,
        /// Center Y.
        cy: f64,
        /// Radius.
        r: f64,
    },
    /// Axis-aligned ellipse.
    Ellipse {
        /// Center X.
        cx: f64,
        /// Center Y.
        cy: f64,
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
    },
    /// Single straight line.
    Line {
        /// Start X.
        x1: f64,
        /// Start Y.
        y1: f64,
        /// End X.
        x2: f64,
        /// End Y.
        y2: f64,
    },
    /// Open chain of points.
    Polyline {
        /// Vertices as `[x, y]` pairs.
        points: Vec<[f64; 2]>,
    },
    /// Closed chain of points.
    Polygon {
        /// Vertices as `[x, y]` pairs.
        points: Vec<[f64; 2]>,
    },
}

impl ShapeDef {
    /// Shape from path data.
    pub fn path(d: impl Into<String>) -> Self {
        Self::from_geometry(ShapeGeometry::Path { d: d.into() })
    }

    /// Shape from bare geometry, with no id and no fill.
    pub fn from_geometry(geometry: ShapeGeometry) -> Self {
        Self {
            id: None,
            fill: None,
            geometry,
        }
    }

    /// `true` when the fill paint is present and visible.
    pub fn has_fill(&self) -> bool {
        self.fill.as_deref().is_some_and(|f| {
            let f = f.trim();
            !f.is_empty()
                && !f.eq_ignore_ascii_case("none")
                && !f.eq_ignore_ascii_case("transparent")
        })
    }

    /// Decompose the shape into drawable paths.
    ///
    /// Path ids are `"{shape_id}/{n}"`; the fill-like flag is set on closed paths of filled
    /// shapes. Degenerate geometry (non-finite or negative sizes) yields no paths.
    pub fn to_paths(&self, index: usize) -> Result<Vec<ParsedPath>, PathDataError> {
        let shape_id = self.id.clone().unwrap_or_else(|| index.to_string());
        let mut paths = match &self.geometry {
            ShapeGeometry::Path { d } => try_parse_path_data(d)?,
            geometry => basic_shape_path(geometry).into_iter().collect(),
        };

        let fill = self.has_fill();
        for (n, p) in paths.iter_mut().enumerate() {
            p.id = format!("{shape_id}/{n}");
            p.is_fill_like = fill && p.is_closed;
        }
        Ok(paths)
    }
}

fn basic_shape_path(geometry: &ShapeGeometry) -> Option<ParsedPath> {
    match *geometry {
        ShapeGeometry::Path { .. } => None,
        ShapeGeometry::Rect {
            x,
            y,
            width,
            height,
        } => {
            if !all_finite(&[x, y, width, height]) || width < 0.0 || height < 0.0 {
                return None;
            }
            let corners = [
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
            ];
            Some(polyline(&corners, true))
        }
        ShapeGeometry::Circle { cx, cy, r } => ellipse(cx, cy, r, r),
        ShapeGeometry::Ellipse { cx, cy, rx, ry } => ellipse(cx, cy, rx, ry),
        ShapeGeometry::Line { x1, y1, x2, y2 } => {
            if !all_finite(&[x1, y1, x2, y2]) {
                return None;
            }
            Some(polyline(&[Point::new(x1, y1), Point::new(x2, y2)], false))
        }
        ShapeGeometry::Polyline { ref points } => points_path(points, false),
        ShapeGeometry::Polygon { ref points } => points_path(points, true),
    }
}

fn points_path(points: &[[f64; 2]], closed: bool) -> Option<ParsedPath> {
    if points.is_empty() || !points.iter().all(|p| all_finite(p)) {
        return None;
    }
    let pts: Vec<Point> = points.iter().map(|&[x, y]| Point::new(x, y)).collect();
    if closed {
        // Polygons close with an explicit close segment.
        let mut segments: Vec<Segment> =
            pts.windows(2).map(|w| Segment::line(w[0], w[1])).collect();
        let last = pts[pts.len() - 1];
        if pts.len() > 1 {
            segments.push(Segment::close(last, pts[0]));
        }
        Some(ParsedPath::from_segments("", pts[0], segments))
    } else {
        Some(polyline(&pts, false))
    }
}

/// Line chain through `pts`; `wrap` adds an explicit edge from the last point back to the first.
fn polyline(pts: &[Point], wrap: bool) -> ParsedPath {
    let mut segments: Vec<Segment> = pts.windows(2).map(|w| Segment::line(w[0], w[1])).collect();
    if wrap && pts.len() > 1 {
        segments.push(Segment::line(pts[pts.len() - 1], pts[0]));
    }
    ParsedPath::from_segments("", pts[0], segments)
}

/// Four quarter arcs starting at the rightmost point, clockwise in screen space.
fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Option<ParsedPath> {
    if !all_finite(&[cx, cy, rx, ry]) || rx <= 0.0 || ry <= 0.0 {
        return None;
    }
    let quadrants = [
        Point::new(cx + rx, cy),
        Point::new(cx, cy + ry),
        Point::new(cx - rx, cy),
        Point::new(cx, cy - ry),
    ];
    let params = ArcParams {
        radii: Vec2::new(rx, ry),
        x_rotation_deg: 0.0,
        large_arc: false,
        sweep: true,
    };
    let segments = (0..4)
        .map(|i| Segment::arc(quadrants[i], quadrants[(i + 1) % 4], params))
        .collect();
    Some(ParsedPath::from_segments("", quadrants[0], segments))
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/path/shape.rs"]
mod tests;
