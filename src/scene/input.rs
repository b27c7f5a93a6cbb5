use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Canvas, Fps, Size};
use crate::foundation::error::{WhiteboardError, WhiteboardResult};
use crate::path::shape::ShapeDef;
use crate::scene::config::EngineConfig;
use crate::timing::schedule::Strategy;

/// Largest accepted draw budget, in frames.
pub const MAX_DRAW_BUDGET_FRAMES: u64 = 1_000_000;

/// JSON-facing description of one whiteboard scene.
///
/// ```json
/// {
///   "canvas": {"width": 1920, "height": 1080},
///   "fps": 30,
///   "draw_budget_frames": 150,
///   "strategy": "sequential",
///   "shapes": [{"kind": "path", "d": "M10 10 L200 10"}]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneInput {
    /// Output canvas.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Frames available for drawing; later frames hold the finished drawing.
    pub draw_budget_frames: u64,
    /// Drawing order strategy.
    #[serde(default)]
    pub strategy: Strategy,
    /// Size the vector data was authored for. Defaults to the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_size: Option<Size>,
    /// Source shapes in document order.
    pub shapes: Vec<ShapeDef>,
    /// Tuning constants.
    #[serde(default)]
    pub config: EngineConfig,
}

impl SceneInput {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> WhiteboardResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| WhiteboardError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON string.
    pub fn from_json_str(s: &str) -> WhiteboardResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> WhiteboardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WhiteboardError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Canonical JSON encoding, used for content hashing.
    pub fn to_canonical_json(&self) -> WhiteboardResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| WhiteboardError::serde(format!("encode scene JSON: {e}")))
    }

    /// Frame the artifact filter and length scale compare against.
    pub fn source_frame(&self) -> Size {
        self.source_size.unwrap_or_else(|| self.canvas.size())
    }

    /// Check scene parameters and tuning constants.
    pub fn validate(&self) -> WhiteboardResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(WhiteboardError::validation(
                "canvas width and height must be > 0",
            ));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.draw_budget_frames > MAX_DRAW_BUDGET_FRAMES {
            return Err(WhiteboardError::validation(format!(
                "draw_budget_frames must be <= {MAX_DRAW_BUDGET_FRAMES}"
            )));
        }
        if let Some(s) = self.source_size {
            if !(s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0)
            {
                return Err(WhiteboardError::validation(
                    "source_size must be finite and > 0",
                ));
            }
        }
        self.config.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/input.rs"]
mod tests;
