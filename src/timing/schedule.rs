//! Deterministic reveal scheduling.
//!
//! Paths are ordered per [`Strategy`], laid out on a seconds timeline at a constant draw
//! velocity with short overlaps, compressed uniformly when the plan overruns the draw budget,
//! and finally quantized to frame windows inside `[0, budget)`.

use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{FrameIndex, FrameRange, Fps};
use crate::foundation::error::{WhiteboardError, WhiteboardResult};
use crate::path::segment::ParsedPath;

/// Ordering strategy for the drawing sequence.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Top-to-bottom rows, then left-to-right; a lower row waits for the rows above.
    #[default]
    Sequential,
    /// Every path starts at frame 0.
    Parallel,
    /// Spatial buckets, shortest paths first within a bucket.
    Balanced,
}

impl Strategy {
    /// Lowercase name as used in scene JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = WhiteboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            "balanced" => Ok(Self::Balanced),
            other => Err(WhiteboardError::validation(format!(
                "unknown strategy \"{other}\" (expected sequential, parallel or balanced)"
            ))),
        }
    }
}

/// Timing constants for [`build_schedule`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Draw time per unit of estimated length.
    pub seconds_per_pixel: f64,
    /// How far a path may start before its predecessor ends.
    pub overlap_seconds: f64,
    /// Vertical tolerance for grouping paths into one row.
    pub row_tolerance: f64,
    /// Bucket size for the balanced strategy.
    pub balanced_bucket: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            seconds_per_pixel: 0.0025,
            overlap_seconds: 0.020,
            row_tolerance: 2.0,
            balanced_bucket: 20.0,
        }
    }
}

impl ScheduleConfig {
    pub(crate) fn validate(&self) -> WhiteboardResult<()> {
        if !self.seconds_per_pixel.is_finite() || self.seconds_per_pixel <= 0.0 {
            return Err(WhiteboardError::validation(
                "schedule.seconds_per_pixel must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("overlap_seconds", self.overlap_seconds),
            ("row_tolerance", self.row_tolerance),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(WhiteboardError::validation(format!(
                    "schedule.{name} must be finite and >= 0"
                )));
            }
        }
        if !self.balanced_bucket.is_finite() || self.balanced_bucket <= 0.0 {
            return Err(WhiteboardError::validation(
                "schedule.balanced_bucket must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Frame window assigned to one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleEntry {
    /// Index into the scene's path list.
    pub path_index: usize,
    /// First frame with visible progress.
    pub start_frame: u64,
    /// First frame at which the path is fully drawn.
    pub end_frame: u64,
}

impl ScheduleEntry {
    /// The entry window as a frame range.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.end_frame),
        }
    }

    /// Window length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.range().len_frames()
    }
}

/// Complete reveal plan for a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Schedule {
    /// One entry per path, ordered by `path_index`.
    pub entries: Vec<ScheduleEntry>,
    /// Path indices in drawing order.
    pub draw_order: Vec<usize>,
    /// Draw budget the entries were fitted into.
    pub budget_frames: u64,
    /// Length of the uncompressed plan in seconds.
    pub planned_seconds: f64,
    /// Uniform time scale applied to fit the budget (`1.0` when the plan fit).
    pub compression: f64,
}

impl Schedule {
    /// `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest end frame of any entry.
    pub fn last_end_frame(&self) -> u64 {
        self.entries.iter().map(|e| e.end_frame).max().unwrap_or(0)
    }
}

/// Build the reveal schedule for measured `paths`.
///
/// Entries satisfy `start < end <= max(budget, 1)`; a zero budget squeezes every entry into
/// `[0, 1)`.
pub fn build_schedule(
    paths: &[ParsedPath],
    strategy: Strategy,
    fps: Fps,
    budget_frames: u64,
    cfg: &ScheduleConfig,
) -> Schedule {
    let order = draw_order(paths, strategy, cfg);
    let min_secs = fps.frame_duration_secs();

    // Seconds timeline, indexed by path.
    let mut times = vec![(0.0_f64, 0.0_f64); paths.len()];
    let mut prev: Option<usize> = None;
    let mut max_end = 0.0_f64;
    for &i in &order {
        let p = &paths[i];
        let dur = path_seconds(p, cfg).max(min_secs);
        let start = match (strategy, prev) {
            (Strategy::Parallel, _) | (_, None) => 0.0,
            (Strategy::Sequential, Some(j)) => {
                if p.bounding_top_y > paths[j].bounding_bottom_y + cfg.row_tolerance {
                    max_end
                } else {
                    (times[j].1 - cfg.overlap_seconds).max(0.0)
                }
            }
            (Strategy::Balanced, Some(j)) => (times[j].1 - cfg.overlap_seconds).max(0.0),
        };
        times[i] = (start, start + dur);
        max_end = max_end.max(start + dur);
        prev = Some(i);
    }

    let available = fps.frames_to_secs(budget_frames);
    let compression = if max_end > available && max_end > 0.0 {
        available / max_end
    } else {
        1.0
    };
    if compression < 1.0 {
        tracing::debug!(
            planned_seconds = max_end,
            available,
            compression,
            "compressing schedule to fit draw budget"
        );
    }

    let fps_f = fps.as_f64();
    let window = budget_frames.max(1);
    let entries = times
        .iter()
        .enumerate()
        .map(|(path_index, &(s, e))| {
            let start = to_frame(s * compression, fps_f).min(window - 1);
            let end = to_frame(e * compression, fps_f).clamp(start + 1, window);
            ScheduleEntry {
                path_index,
                start_frame: start,
                end_frame: end,
            }
        })
        .collect();

    Schedule {
        entries,
        draw_order: order,
        budget_frames,
        planned_seconds: max_end,
        compression,
    }
}

fn path_seconds(p: &ParsedPath, cfg: &ScheduleConfig) -> f64 {
    let secs = p.total_length * cfg.seconds_per_pixel;
    if secs.is_finite() { secs } else { 0.0 }
}

fn to_frame(secs: f64, fps: f64) -> u64 {
    let f = (secs * fps).round();
    if f.is_finite() && f > 0.0 { f as u64 } else { 0 }
}

/// Path indices in drawing order for `strategy`.
pub fn draw_order(paths: &[ParsedPath], strategy: Strategy, cfg: &ScheduleConfig) -> Vec<usize> {
    let mut order: Vec<usize> = (0..paths.len()).collect();
    match strategy {
        Strategy::Parallel => {}
        Strategy::Sequential => sequential_order(paths, &mut order, cfg.row_tolerance),
        Strategy::Balanced => {
            let bucket = |v: f64| (v / cfg.balanced_bucket).floor();
            order.sort_by(|&a, &b| {
                let (pa, pb) = (&paths[a], &paths[b]);
                bucket(pa.bounding_top_y)
                    .total_cmp(&bucket(pb.bounding_top_y))
                    .then_with(|| bucket(pa.start_point.x).total_cmp(&bucket(pb.start_point.x)))
                    .then_with(|| pa.total_length.total_cmp(&pb.total_length))
            });
        }
    }
    order
}

/// Rows by top edge, then sub-rows by bottom edge, then left to right.
///
/// Tolerance grouping is done by explicit clustering (each cluster anchored at its first,
/// smallest member) so the comparator stays a total order.
fn sequential_order(paths: &[ParsedPath], order: &mut [usize], tol: f64) {
    order.sort_by(|&a, &b| paths[a].bounding_top_y.total_cmp(&paths[b].bounding_top_y));
    for row in clusters(order, |i| paths[i].bounding_top_y, tol) {
        let row = &mut order[row];
        row.sort_by(|&a, &b| {
            paths[a]
                .bounding_bottom_y
                .total_cmp(&paths[b].bounding_bottom_y)
        });
        for band in clusters(row, |i| paths[i].bounding_bottom_y, tol) {
            order_by_x(paths, &mut row[band]);
        }
    }
}

fn order_by_x(paths: &[ParsedPath], idx: &mut [usize]) {
    idx.sort_by(|&a, &b| paths[a].start_point.x.total_cmp(&paths[b].start_point.x));
}

/// Split a slice sorted by `key` into runs whose keys lie within `tol` of the run's first key.
fn clusters(
    sorted: &[usize],
    key: impl Fn(usize) -> f64,
    tol: f64,
) -> Vec<std::ops::Range<usize>> {
    let mut out = Vec::new();
    let mut start = 0;
    while start < sorted.len() {
        let anchor = key(sorted[start]);
        let mut end = start + 1;
        while end < sorted.len() && key(sorted[end]) - anchor <= tol {
            end += 1;
        }
        out.push(start..end);
        start = end;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/timing/schedule.rs"]
mod tests;
