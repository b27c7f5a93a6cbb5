//! Scene-wide content-to-canvas framing.

use crate::foundation::core::{Affine, Point, Rect, Size, Vec2};
use crate::foundation::error::{WhiteboardError, WhiteboardResult};
use crate::path::segment::ParsedPath;

/// Framing parameters for [`compute_autofit`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutoFitConfig {
    /// Fraction of the padded safe area the content should cover.
    pub coverage: f64,
    /// Padding on each side, as a fraction of the canvas dimension.
    pub padding: f64,
    /// Scale multiplier for busy scenes.
    pub boost: f64,
    /// Path count that always triggers the boost.
    pub boost_path_count: usize,
    /// Path count that triggers the boost when content is also small.
    pub small_content_path_count: usize,
    /// Content spanning less than this fraction of the source frame in both axes counts as
    /// small.
    pub small_content_span: f64,
}

impl Default for AutoFitConfig {
    fn default() -> Self {
        Self {
            coverage: 0.78,
            padding: 0.07,
            boost: 1.10,
            boost_path_count: 80,
            small_content_path_count: 40,
            small_content_span: 0.40,
        }
    }
}

impl AutoFitConfig {
    pub(crate) fn validate(&self) -> WhiteboardResult<()> {
        if !self.coverage.is_finite() || self.coverage <= 0.0 {
            return Err(WhiteboardError::validation(
                "autofit.coverage must be finite and > 0",
            ));
        }
        if !(0.0..0.5).contains(&self.padding) {
            return Err(WhiteboardError::validation(
                "autofit.padding must be in [0, 0.5)",
            ));
        }
        if !self.boost.is_finite() || self.boost <= 0.0 {
            return Err(WhiteboardError::validation(
                "autofit.boost must be finite and > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.small_content_span) {
            return Err(WhiteboardError::validation(
                "autofit.small_content_span must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Uniform scale followed by a translation: `p' = p * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitTransform {
    /// Uniform scale factor.
    pub scale: f64,
    /// Horizontal offset applied after scaling.
    pub offset_x: f64,
    /// Vertical offset applied after scaling.
    pub offset_y: f64,
}

impl FitTransform {
    /// No scaling, no offset.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Equivalent affine matrix.
    pub fn to_affine(self) -> Affine {
        Affine::translate(Vec2::new(self.offset_x, self.offset_y)) * Affine::scale(self.scale)
    }

    /// Map a content-space point to canvas space.
    pub fn apply(self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    fn is_finite(self) -> bool {
        self.scale.is_finite() && self.offset_x.is_finite() && self.offset_y.is_finite()
    }
}

impl Default for FitTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Result of [`compute_autofit`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AutoFit {
    /// Transform to apply to all content.
    pub transform: FitTransform,
    /// Aggregate content bounds the transform was derived from.
    pub bounds: Option<Rect>,
    /// Set when the bounds were unusable and the identity was substituted.
    pub degenerate: bool,
    /// Set when the busy-scene boost was applied.
    pub boosted: bool,
}

impl AutoFit {
    fn identity(bounds: Option<Rect>) -> Self {
        Self {
            transform: FitTransform::IDENTITY,
            bounds,
            degenerate: true,
            boosted: false,
        }
    }
}

/// Union of all path bounds, or `None` for no paths.
pub fn content_bounds(paths: &[ParsedPath]) -> Option<Rect> {
    paths
        .iter()
        .map(ParsedPath::bounds)
        .reduce(|acc, r| acc.union(r))
}

/// Scale and center `bounds` inside the padded canvas.
///
/// `bounds` are in source units; `source_frame` is the frame they were authored in and decides
/// whether content counts as small, so the boost does not depend on output resolution.
pub fn compute_autofit(
    bounds: Option<Rect>,
    path_count: usize,
    canvas: Size,
    source_frame: Size,
    cfg: &AutoFitConfig,
) -> AutoFit {
    let Some(b) = bounds else {
        tracing::debug!("no content bounds; using identity fit");
        return AutoFit::identity(None);
    };
    let (bw, bh) = (b.width(), b.height());
    let finite = [b.x0, b.y0, b.x1, b.y1].iter().all(|v| v.is_finite());
    if !finite || bw <= 0.0 || bh <= 0.0 || canvas.width <= 0.0 || canvas.height <= 0.0 {
        tracing::warn!(?b, "degenerate content bounds; falling back to identity fit");
        return AutoFit::identity(Some(b));
    }

    let pad_x = canvas.width * cfg.padding;
    let pad_y = canvas.height * cfg.padding;
    let safe_w = canvas.width - 2.0 * pad_x;
    let safe_h = canvas.height - 2.0 * pad_y;

    let upper = (safe_w / bw).min(safe_h / bh);
    let cover = (cfg.coverage * safe_w / bw).min(cfg.coverage * safe_h / bh);
    let mut scale = cover.min(upper);

    let small = bw < source_frame.width * cfg.small_content_span
        && bh < source_frame.height * cfg.small_content_span;
    let boosted = path_count >= cfg.boost_path_count
        || (small && path_count >= cfg.small_content_path_count);
    if boosted {
        scale = (scale * cfg.boost).min(upper);
    }

    let transform = FitTransform {
        scale,
        offset_x: pad_x + (safe_w - bw * scale) / 2.0 - b.x0 * scale,
        offset_y: pad_y + (safe_h - bh * scale) / 2.0 - b.y0 * scale,
    };
    if !transform.is_finite() || transform.scale <= 0.0 {
        tracing::warn!(?transform, "non-finite autofit; falling back to identity fit");
        return AutoFit::identity(Some(b));
    }

    AutoFit {
        transform,
        bounds: Some(b),
        degenerate: false,
        boosted,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/autofit.rs"]
mod tests;
