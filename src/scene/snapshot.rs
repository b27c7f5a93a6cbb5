use crate::foundation::core::{FrameIndex, Point};
use crate::geometry::autofit::FitTransform;
use crate::scene::prepared::ContentStatus;

/// Dash pattern that reveals a prefix of a stroke.
///
/// The dash is one unit longer than the path so the gap never shows at full reveal; the offset
/// shrinks from `length` (hidden) to `0` (fully drawn).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StrokeDash {
    /// Dash and gap length.
    pub length: f64,
    /// Dash offset.
    pub offset: f64,
}

impl StrokeDash {
    /// Dash for revealing `reveal` of a stroke of `total_length`.
    pub fn for_reveal(total_length: f64, reveal: f64) -> Self {
        let length = total_length.max(0.0) + 1.0;
        Self {
            length,
            offset: length * (1.0 - reveal.clamp(0.0, 1.0)),
        }
    }
}

/// Render instruction for one path at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PathReveal<'a> {
    /// Path id.
    pub path_id: &'a str,
    /// Absolute SVG path data in content space.
    pub d: &'a str,
    /// Estimated length of each segment.
    pub segment_lengths: &'a [f64],
    /// Sum of `segment_lengths`.
    pub total_length: f64,
    /// Visible fraction in `[0, 1]`.
    pub reveal: f64,
    /// Dash pattern implementing `reveal`.
    pub dash: StrokeDash,
    /// Opacity of the fill pass; always `0` for paths that are not fill-like.
    pub fill_alpha: f64,
}

/// Everything a renderer needs for one frame.
///
/// Borrows geometry from the prepared scene, so building a snapshot allocates only the
/// per-path list.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSnapshot<'a> {
    /// Sampled frame.
    pub frame: FrameIndex,
    /// Whether the scene has anything to draw.
    pub status: ContentStatus,
    /// Content-to-canvas transform.
    pub transform: FitTransform,
    /// Catch-up factor in effect.
    pub acceleration: f64,
    /// Set past the draw budget, where the finished drawing is held.
    pub holding: bool,
    /// Canvas-space position of the drawing tip, if a stroke is in progress.
    pub pen: Option<Point>,
    /// One entry per path, in path order.
    pub paths: Vec<PathReveal<'a>>,
}

impl<'a> FrameSnapshot<'a> {
    /// `true` when every path is fully revealed.
    pub fn is_complete(&self) -> bool {
        self.paths.iter().all(|p| p.reveal >= 1.0)
    }

    /// Paths with any visible stroke.
    pub fn visible_paths(&self) -> impl Iterator<Item = &PathReveal<'a>> {
        self.paths.iter().filter(|p| p.reveal > 0.0)
    }
}
