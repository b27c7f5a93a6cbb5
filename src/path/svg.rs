//! SVG document ingestion.
//!
//! `usvg` resolves the document (basic shapes become paths, `use` references are expanded,
//! transforms are accumulated); this module bakes each visible path's absolute transform into
//! plain path data so the rest of the engine only ever sees [`ShapeDef`]s.

use std::fmt::Write as _;

use usvg::tiny_skia_path::PathSegment;

use crate::foundation::core::Size;
use crate::foundation::error::{WhiteboardError, WhiteboardResult};
use crate::path::shape::{ShapeDef, ShapeGeometry};

/// Shapes extracted from an SVG document.
#[derive(Clone, Debug)]
pub struct SvgImport {
    /// Document size in user units; use it as the scene's `source_size`.
    pub size: Size,
    /// Visible paths in document order.
    pub shapes: Vec<ShapeDef>,
}

/// Load an SVG document and extract its visible paths.
///
/// Text and raster images are skipped.
pub fn import_svg(data: &[u8]) -> WhiteboardResult<SvgImport> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &opts)
        .map_err(|e| WhiteboardError::import(format!("parse svg tree: {e}")))?;

    let mut shapes = Vec::new();
    collect_group(tree.root(), &mut shapes);

    let size = tree.size();
    Ok(SvgImport {
        size: Size::new(f64::from(size.width()), f64::from(size.height())),
        shapes,
    })
}

fn collect_group(group: &usvg::Group, out: &mut Vec<ShapeDef>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => collect_group(g, out),
            usvg::Node::Path(p) => {
                if let Some(shape) = path_shape(p) {
                    out.push(shape);
                }
            }
            usvg::Node::Image(_) | usvg::Node::Text(_) => {
                tracing::debug!(id = node.id(), "skipping non-path svg node");
            }
        }
    }
}

fn path_shape(path: &usvg::Path) -> Option<ShapeDef> {
    if !path.is_visible() {
        return None;
    }
    let data = path.data().clone().transform(path.abs_transform())?;
    let d = path_data(&data);
    if d.is_empty() {
        return None;
    }

    let id = path.id();
    Some(ShapeDef {
        id: (!id.is_empty()).then(|| id.to_string()),
        fill: path.fill().map(fill_paint),
        geometry: ShapeGeometry::Path { d },
    })
}

fn fill_paint(fill: &usvg::Fill) -> String {
    if fill.opacity().get() <= 0.0 {
        return "none".to_string();
    }
    match fill.paint() {
        usvg::Paint::Color(c) => format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue),
        _ => "paint".to_string(),
    }
}

fn path_data(data: &usvg::tiny_skia_path::Path) -> String {
    let mut d = String::new();
    for seg in data.segments() {
        // Writing into a String cannot fail.
        let _ = match seg {
            PathSegment::MoveTo(p) => write!(d, "M{} {} ", p.x, p.y),
            PathSegment::LineTo(p) => write!(d, "L{} {} ", p.x, p.y),
            PathSegment::QuadTo(c, p) => write!(d, "Q{} {} {} {} ", c.x, c.y, p.x, p.y),
            PathSegment::CubicTo(c1, c2, p) => write!(
                d,
                "C{} {} {} {} {} {} ",
                c1.x, c1.y, c2.x, c2.y, p.x, p.y
            ),
            PathSegment::Close => write!(d, "Z "),
        };
    }
    d.truncate(d.trim_end().len());
    d
}

#[cfg(test)]
#[path = "../../tests/unit/path/svg.rs"]
mod tests;
