//! Analytic on-screen length estimates.
//!
//! Lengths drive draw durations only, so cheap control-polygon approximations are used instead
//! of true arc length.

use crate::foundation::core::Size;
use crate::foundation::error::{WhiteboardError, WhiteboardResult};
use crate::path::segment::{ParsedPath, Segment, SegmentKind};

/// Correction factors and floor used by the length estimator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LengthConfig {
    /// Multiplier on a cubic's control-polygon length.
    pub cubic_factor: f64,
    /// Multiplier on a quadratic's control-polygon length.
    pub quadratic_factor: f64,
    /// Multiplier on an arc's chord length.
    pub arc_factor: f64,
    /// Smallest length assigned to a non-degenerate segment.
    pub min_length: f64,
}

impl Default for LengthConfig {
    fn default() -> Self {
        Self {
            cubic_factor: 0.85,
            quadratic_factor: 0.75,
            arc_factor: 1.2,
            min_length: 50.0,
        }
    }
}

impl LengthConfig {
    pub(crate) fn validate(&self) -> WhiteboardResult<()> {
        for (name, v) in [
            ("cubic_factor", self.cubic_factor),
            ("quadratic_factor", self.quadratic_factor),
            ("arc_factor", self.arc_factor),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(WhiteboardError::validation(format!(
                    "length.{name} must be finite and > 0"
                )));
            }
        }
        if !self.min_length.is_finite() || self.min_length < 0.0 {
            return Err(WhiteboardError::validation(
                "length.min_length must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// `sqrt(canvas area / reference area)`, or `1.0` when either size is unusable.
pub fn resolution_scale(canvas: Size, reference: Option<Size>) -> f64 {
    let Some(reference) = reference else {
        return 1.0;
    };
    let area = canvas.width * canvas.height;
    let ref_area = reference.width * reference.height;
    if !(area.is_finite() && ref_area.is_finite() && area > 0.0 && ref_area > 0.0) {
        return 1.0;
    }
    let scale = (area / ref_area).sqrt();
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Estimated length of one segment after resolution scaling.
///
/// Degenerate segments measure zero; everything else is floored at `min_length`.
pub fn estimate_segment(segment: &Segment, scale: f64, cfg: &LengthConfig) -> f64 {
    if segment.is_degenerate() {
        return 0.0;
    }
    let raw = match segment.kind {
        SegmentKind::Line | SegmentKind::Close => segment.chord_length(),
        SegmentKind::CubicCurve => segment.control_polygon_length() * cfg.cubic_factor,
        SegmentKind::QuadraticCurve => segment.control_polygon_length() * cfg.quadratic_factor,
        SegmentKind::Arc => segment.chord_length() * cfg.arc_factor,
    };
    let scaled = raw * scale;
    if scaled.is_finite() {
        scaled.max(cfg.min_length)
    } else {
        cfg.min_length
    }
}

/// Fill in every segment length of `path` and its total.
pub fn measure_path(path: &mut ParsedPath, scale: f64, cfg: &LengthConfig) {
    for s in &mut path.segments {
        s.length = estimate_segment(s, scale, cfg);
    }
    path.recompute_total();
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/length.rs"]
mod tests;
