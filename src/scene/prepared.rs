//! One-time scene preparation and per-frame sampling.

use crate::foundation::core::{Canvas, Fps, FrameIndex, Rect};
use crate::foundation::error::WhiteboardResult;
use crate::geometry::artifact::{DiscardedArtifact, filter_artifacts};
use crate::geometry::autofit::{AutoFit, FitTransform, compute_autofit, content_bounds};
use crate::geometry::length::{measure_path, resolution_scale};
use crate::path::segment::ParsedPath;
use crate::scene::config::EngineConfig;
use crate::scene::input::SceneInput;
use crate::scene::snapshot::{FrameSnapshot, PathReveal, StrokeDash};
use crate::timing::sampler::ProgressSampler;
use crate::timing::schedule::{Schedule, ScheduleEntry, Strategy, build_schedule};

/// Why a scene has nothing to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoContentReason {
    /// The input listed no shapes.
    NoShapes,
    /// No shape produced a path (empty, degenerate or unparseable data).
    NoPaths,
    /// Every path was classified as an artifact.
    AllArtifacts,
}

/// Whether a prepared scene has anything to draw.
///
/// Renderers should show an explicit empty state for [`ContentStatus::NoContent`] instead of a
/// blank canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ContentStatus {
    /// At least one path survived preparation.
    Ready,
    /// Nothing to draw.
    NoContent(NoContentReason),
}

impl ContentStatus {
    /// `true` for [`ContentStatus::Ready`].
    pub fn has_content(self) -> bool {
        self == Self::Ready
    }
}

/// The surviving, measured paths of a scene plus its timing parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Measured paths in source order.
    pub paths: Vec<ParsedPath>,
    /// Output canvas.
    pub canvas: Canvas,
    /// Frames available for drawing.
    pub draw_budget_frames: u64,
    /// Output frame rate.
    pub fps: Fps,
    /// Drawing order strategy.
    pub strategy: Strategy,
}

/// Bookkeeping from [`PreparedScene::prepare`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PrepareReport {
    /// Shapes in the input.
    pub shape_count: usize,
    /// Paths produced by parsing, before artifact filtering.
    pub parsed_path_count: usize,
    /// Shapes whose path data failed to parse.
    pub parse_failures: usize,
    /// Paths removed as artifacts.
    pub discarded: Vec<DiscardedArtifact>,
}

/// Schedule window of one path in a [`PlanSummary`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlannedPath {
    /// Path id.
    pub path_id: String,
    /// First frame with visible progress.
    pub start_frame: u64,
    /// First fully drawn frame.
    pub end_frame: u64,
    /// Estimated length.
    pub total_length: f64,
    /// Whether a fill pass follows the outline.
    pub is_fill_like: bool,
}

/// Serializable overview of a prepared scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlanSummary {
    /// Output canvas.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Drawing order strategy.
    pub strategy: Strategy,
    /// Frames available for drawing.
    pub draw_budget_frames: u64,
    /// Content status.
    pub status: ContentStatus,
    /// Shapes in the input.
    pub shape_count: usize,
    /// Paths before artifact filtering.
    pub parsed_path_count: usize,
    /// Paths that will be drawn.
    pub path_count: usize,
    /// Shapes that failed to parse.
    pub parse_failures: usize,
    /// Paths removed as artifacts.
    pub discarded_artifacts: usize,
    /// Uncompressed plan length in seconds.
    pub planned_seconds: f64,
    /// Uniform time compression applied to fit the budget.
    pub compression: f64,
    /// Peak catch-up factor.
    pub max_acceleration: f64,
    /// Content-to-canvas transform.
    pub fit: FitTransform,
    /// Set when the transform fell back to identity.
    pub fit_degenerate: bool,
    /// Set when the busy-scene boost was applied.
    pub fit_boosted: bool,
    /// Aggregate content bounds.
    pub content_bounds: Option<Rect>,
    /// Schedule windows in drawing order.
    pub entries: Vec<PlannedPath>,
}

/// A scene with its schedule, sampler and transform computed once.
///
/// Cheap to sample per frame; see [`PreparedScene::sample`].
#[derive(Clone, Debug)]
pub struct PreparedScene {
    scene: Scene,
    config: EngineConfig,
    schedule: Schedule,
    sampler: ProgressSampler,
    fit: AutoFit,
    report: PrepareReport,
    status: ContentStatus,
    path_data: Vec<String>,
    segment_lengths: Vec<Vec<f64>>,
}

impl PreparedScene {
    /// Parse, filter, measure, schedule and fit `input`.
    ///
    /// Fails only for invalid parameters; scenes with nothing to draw succeed with a
    /// [`ContentStatus::NoContent`] status.
    #[tracing::instrument(
        skip_all,
        fields(shapes = input.shapes.len(), strategy = %input.strategy)
    )]
    pub fn prepare(input: &SceneInput) -> WhiteboardResult<Self> {
        input.validate()?;
        let cfg = input.config;

        let mut report = PrepareReport {
            shape_count: input.shapes.len(),
            ..PrepareReport::default()
        };
        let mut parsed = Vec::new();
        for (i, shape) in input.shapes.iter().enumerate() {
            match shape.to_paths(i) {
                Ok(paths) => parsed.extend(paths),
                Err(err) => {
                    tracing::warn!(shape = i, %err, "discarding unparseable shape");
                    report.parse_failures += 1;
                }
            }
        }
        report.parsed_path_count = parsed.len();

        let (mut paths, discarded) =
            filter_artifacts(parsed, input.source_frame(), &cfg.artifacts);
        report.discarded = discarded;

        let scale = resolution_scale(input.canvas.size(), input.source_size);
        for p in &mut paths {
            measure_path(p, scale, &cfg.length);
        }

        let status = if input.shapes.is_empty() {
            ContentStatus::NoContent(NoContentReason::NoShapes)
        } else if report.parsed_path_count == 0 {
            ContentStatus::NoContent(NoContentReason::NoPaths)
        } else if paths.is_empty() {
            ContentStatus::NoContent(NoContentReason::AllArtifacts)
        } else {
            ContentStatus::Ready
        };

        let schedule = build_schedule(
            &paths,
            input.strategy,
            input.fps,
            input.draw_budget_frames,
            &cfg.schedule,
        );
        let sampler = ProgressSampler::new(&schedule, input.strategy, &cfg.sampler);
        let fit = compute_autofit(
            content_bounds(&paths),
            paths.len(),
            input.canvas.size(),
            input.source_frame(),
            &cfg.autofit,
        );

        let path_data = paths.iter().map(ParsedPath::to_svg_path_data).collect();
        let segment_lengths = paths.iter().map(ParsedPath::segment_lengths).collect();

        tracing::debug!(
            paths = paths.len(),
            discarded = report.discarded.len(),
            parse_failures = report.parse_failures,
            compression = schedule.compression,
            ?status,
            "scene prepared"
        );

        Ok(Self {
            scene: Scene {
                paths,
                canvas: input.canvas,
                draw_budget_frames: input.draw_budget_frames,
                fps: input.fps,
                strategy: input.strategy,
            },
            config: cfg,
            schedule,
            sampler,
            fit,
            report,
            status,
            path_data,
            segment_lengths,
        })
    }

    /// Surviving paths and timing parameters.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Effective tuning constants.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reveal schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Progress function over the schedule.
    pub fn sampler(&self) -> &ProgressSampler {
        &self.sampler
    }

    /// Content framing.
    pub fn fit(&self) -> &AutoFit {
        &self.fit
    }

    /// Preparation bookkeeping.
    pub fn report(&self) -> &PrepareReport {
        &self.report
    }

    /// Whether there is anything to draw.
    pub fn status(&self) -> ContentStatus {
        self.status
    }

    /// Reveal state of every path at `frame`.
    ///
    /// Frames at or past the draw budget hold the finished drawing.
    pub fn sample(&self, frame: u64) -> FrameSnapshot<'_> {
        let holding = frame >= self.scene.draw_budget_frames;
        let fade = self.config.fill.fade_frames;

        let paths: Vec<PathReveal<'_>> = self
            .scene
            .paths
            .iter()
            .zip(&self.schedule.entries)
            .enumerate()
            .map(|(i, (path, entry))| {
                let reveal = if holding {
                    1.0
                } else {
                    self.sampler.progress(entry, frame)
                };
                PathReveal {
                    path_id: &path.id,
                    d: &self.path_data[i],
                    segment_lengths: &self.segment_lengths[i],
                    total_length: path.total_length,
                    reveal,
                    dash: StrokeDash::for_reveal(path.total_length, reveal),
                    fill_alpha: if path.is_fill_like {
                        fill_alpha(entry, frame, fade)
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        let pen = if holding {
            None
        } else {
            self.schedule
                .draw_order
                .iter()
                .rev()
                .find(|&&i| paths[i].reveal > 0.0 && paths[i].reveal < 1.0)
                .map(|&i| {
                    let path = &self.scene.paths[i];
                    let tip = path.point_at_length(paths[i].reveal * path.total_length);
                    self.fit.transform.apply(tip)
                })
        };

        FrameSnapshot {
            frame: FrameIndex(frame),
            status: self.status,
            transform: self.fit.transform,
            acceleration: self.sampler.acceleration_at(frame),
            holding,
            pen,
            paths,
        }
    }

    /// Serializable overview of the plan.
    pub fn summary(&self) -> PlanSummary {
        let entries = self
            .schedule
            .draw_order
            .iter()
            .map(|&i| {
                let path = &self.scene.paths[i];
                let entry = &self.schedule.entries[i];
                PlannedPath {
                    path_id: path.id.clone(),
                    start_frame: entry.start_frame,
                    end_frame: entry.end_frame,
                    total_length: path.total_length,
                    is_fill_like: path.is_fill_like,
                }
            })
            .collect();

        PlanSummary {
            canvas: self.scene.canvas,
            fps: self.scene.fps,
            strategy: self.scene.strategy,
            draw_budget_frames: self.scene.draw_budget_frames,
            status: self.status,
            shape_count: self.report.shape_count,
            parsed_path_count: self.report.parsed_path_count,
            path_count: self.scene.paths.len(),
            parse_failures: self.report.parse_failures,
            discarded_artifacts: self.report.discarded.len(),
            planned_seconds: self.schedule.planned_seconds,
            compression: self.schedule.compression,
            max_acceleration: self.sampler.max_acceleration(),
            fit: self.fit.transform,
            fit_degenerate: self.fit.degenerate,
            fit_boosted: self.fit.boosted,
            content_bounds: self.fit.bounds,
            entries,
        }
    }
}

fn fill_alpha(entry: &ScheduleEntry, frame: u64, fade_frames: u64) -> f64 {
    if frame < entry.end_frame {
        return 0.0;
    }
    if fade_frames == 0 {
        return 1.0;
    }
    ((frame - entry.end_frame) as f64 / fade_frames as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/prepared.rs"]
mod tests;
