//! Whiteboard is a stroke-by-stroke reveal engine for vector drawings.
//!
//! Given a set of vector shapes, it decomposes them into drawable segments, estimates their
//! on-screen lengths, plans a deterministic drawing schedule inside a fixed frame budget, and
//! answers "how much of each path is visible at frame N" for a renderer:
//!
//! - Describe a scene as a [`SceneInput`] (or import one with [`import_svg`])
//! - Prepare it once with [`PreparedScene::prepare`] (or memoize through a [`SceneCache`])
//! - Sample a [`FrameSnapshot`] per rendered frame
//!
//! The engine never rasterizes; snapshots carry path data, dash patterns and the scene
//! [`FitTransform`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod geometry;
mod path;
mod scene;
mod timing;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Size, Vec2,
};
pub use crate::foundation::error::{PathDataError, WhiteboardError, WhiteboardResult};

pub use crate::geometry::artifact::{
    ArtifactKind, ArtifactThresholds, DiscardedArtifact, classify, filter_artifacts,
};
pub use crate::geometry::autofit::{
    AutoFit, AutoFitConfig, FitTransform, compute_autofit, content_bounds,
};
pub use crate::geometry::length::{
    LengthConfig, estimate_segment, measure_path, resolution_scale,
};
pub use crate::path::parser::{
    MAX_PATH_DATA_BYTES, MAX_SEGMENTS, parse_path_data, try_parse_path_data,
};
pub use crate::path::segment::{ArcParams, ParsedPath, Segment, SegmentKind};
pub use crate::path::shape::{ShapeDef, ShapeGeometry};
pub use crate::path::svg::{SvgImport, import_svg};
pub use crate::scene::cache::{CacheStats, DEFAULT_CACHE_CAPACITY, SceneCache, SceneKey};
pub use crate::scene::config::{EngineConfig, FillConfig};
pub use crate::scene::input::{MAX_DRAW_BUDGET_FRAMES, SceneInput};
pub use crate::scene::prepared::{
    ContentStatus, NoContentReason, PlanSummary, PlannedPath, PrepareReport, PreparedScene, Scene,
};
pub use crate::scene::snapshot::{FrameSnapshot, PathReveal, StrokeDash};
pub use crate::timing::sampler::{ProgressSampler, SamplerConfig, edge_ramp};
pub use crate::timing::schedule::{
    Schedule, ScheduleConfig, ScheduleEntry, Strategy, build_schedule, draw_order,
};
