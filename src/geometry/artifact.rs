//! Heuristic removal of rendering artifacts (canvas borders, edge bars).

use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{WhiteboardError, WhiteboardResult};
use crate::path::segment::ParsedPath;

/// Tunable thresholds for [`classify`]. Fractions are relative to the source frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactThresholds {
    /// Absolute tolerance (in source units) for "exactly canvas-sized".
    pub exact_tolerance: f64,
    /// Minimum width/height fraction for a near-canvas rectangle.
    pub near_canvas_fraction: f64,
    /// Distance from a border, as a fraction of that axis, that still counts as touching it.
    pub border_margin_fraction: f64,
    /// Maximum thickness fraction of an edge bar.
    pub bar_thickness_fraction: f64,
    /// Minimum span fraction of an edge bar.
    pub bar_span_fraction: f64,
}

impl Default for ArtifactThresholds {
    fn default() -> Self {
        Self {
            exact_tolerance: 10.0,
            near_canvas_fraction: 0.85,
            border_margin_fraction: 0.05,
            bar_thickness_fraction: 0.05,
            bar_span_fraction: 0.5,
        }
    }
}

impl ArtifactThresholds {
    pub(crate) fn validate(&self) -> WhiteboardResult<()> {
        if !self.exact_tolerance.is_finite() || self.exact_tolerance < 0.0 {
            return Err(WhiteboardError::validation(
                "artifacts.exact_tolerance must be finite and >= 0",
            ));
        }
        for (name, v) in [
            ("near_canvas_fraction", self.near_canvas_fraction),
            ("border_margin_fraction", self.border_margin_fraction),
            ("bar_thickness_fraction", self.bar_thickness_fraction),
            ("bar_span_fraction", self.bar_span_fraction),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(WhiteboardError::validation(format!(
                    "artifacts.{name} must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Why a path was treated as an artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Rectangle matching the frame size.
    CanvasRect,
    /// Large rectangle hugging the frame border.
    NearCanvasRect,
    /// Thin full-height bar along the left or right edge.
    VerticalEdgeBar,
    /// Thin full-width bar along the top or bottom edge.
    HorizontalEdgeBar,
}

/// A path removed by [`filter_artifacts`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DiscardedArtifact {
    /// Id of the removed path.
    pub path_id: String,
    /// Matching rule.
    pub kind: ArtifactKind,
}

/// Classify a path bounding box against the source frame.
pub fn classify(bounds: Rect, frame: Size, t: &ArtifactThresholds) -> Option<ArtifactKind> {
    let (w, h) = (bounds.width(), bounds.height());
    let (fw, fh) = (frame.width, frame.height);
    if !(w.is_finite() && h.is_finite() && fw > 0.0 && fh > 0.0) {
        return None;
    }

    if (w - fw).abs() <= t.exact_tolerance && (h - fh).abs() <= t.exact_tolerance {
        return Some(ArtifactKind::CanvasRect);
    }

    let mx = fw * t.border_margin_fraction;
    let my = fh * t.border_margin_fraction;
    let touches_left = bounds.x0 <= mx;
    let touches_right = bounds.x1 >= fw - mx;
    let touches_top = bounds.y0 <= my;
    let touches_bottom = bounds.y1 >= fh - my;

    if w >= fw * t.near_canvas_fraction
        && h >= fh * t.near_canvas_fraction
        && (touches_left || touches_right)
        && (touches_top || touches_bottom)
    {
        return Some(ArtifactKind::NearCanvasRect);
    }
    if w <= fw * t.bar_thickness_fraction
        && h >= fh * t.bar_span_fraction
        && (touches_left || touches_right)
    {
        return Some(ArtifactKind::VerticalEdgeBar);
    }
    if h <= fh * t.bar_thickness_fraction
        && w >= fw * t.bar_span_fraction
        && (touches_top || touches_bottom)
    {
        return Some(ArtifactKind::HorizontalEdgeBar);
    }
    None
}

/// Split `paths` into content and discarded artifacts, preserving order.
pub fn filter_artifacts(
    paths: Vec<ParsedPath>,
    frame: Size,
    t: &ArtifactThresholds,
) -> (Vec<ParsedPath>, Vec<DiscardedArtifact>) {
    let mut kept = Vec::with_capacity(paths.len());
    let mut discarded = Vec::new();
    for path in paths {
        match classify(path.bounds(), frame, t) {
            Some(kind) => {
                tracing::debug!(path_id = %path.id, ?kind, "discarding artifact path");
                discarded.push(DiscardedArtifact {
                    path_id: path.id,
                    kind,
                });
            }
            None => kept.push(path),
        }
    }
    (kept, discarded)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/artifact.rs"]
mod tests;
