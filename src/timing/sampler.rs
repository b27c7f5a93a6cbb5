//! Per-frame reveal progress.

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{WhiteboardError, WhiteboardResult};
use crate::timing::schedule::{Schedule, ScheduleEntry, Strategy};

/// Progress sampling parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerConfig {
    /// Fraction of each window eased in at the start and out at the end.
    pub edge_fraction: f64,
    /// Speed up in-flight paths when outstanding work exceeds the remaining budget.
    pub catch_up: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            edge_fraction: 0.05,
            catch_up: true,
        }
    }
}

impl SamplerConfig {
    pub(crate) fn validate(&self) -> WhiteboardResult<()> {
        if !(0.0..=0.5).contains(&self.edge_fraction) {
            return Err(WhiteboardError::validation(
                "sampler.edge_fraction must be in [0, 0.5]",
            ));
        }
        Ok(())
    }
}

/// Monotone piecewise ramp on `[0, 1]`: quadratic ease over the first and last `edge`
/// fraction, linear in between, continuous in value and slope.
pub fn edge_ramp(t: f64, edge: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if edge <= 0.0 {
        return t;
    }
    let e = edge.min(0.5);
    let slope = 1.0 / (1.0 - e);
    if t < e {
        slope * t * t / (2.0 * e)
    } else if t <= 1.0 - e {
        slope * e / 2.0 + slope * (t - e)
    } else {
        let u = 1.0 - t;
        1.0 - slope * u * u / (2.0 * e)
    }
}

/// Precomputed progress function for one schedule.
///
/// The catch-up factor for frame `f` is `remaining planned frames / remaining budget frames`
/// whenever the former is larger, summed over entries that have not finished by `f`. The table
/// keeps the running maximum so the factor never decreases and progress stays monotone.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressSampler {
    edge: f64,
    catch_up: Vec<f64>,
}

impl ProgressSampler {
    /// Build the sampler for `schedule`. Parallel schedules never accelerate.
    pub fn new(schedule: &Schedule, strategy: Strategy, cfg: &SamplerConfig) -> Self {
        let catch_up = if cfg.catch_up && strategy != Strategy::Parallel {
            catch_up_table(&schedule.entries, schedule.budget_frames)
        } else {
            Vec::new()
        };
        Self {
            edge: cfg.edge_fraction,
            catch_up,
        }
    }

    /// Catch-up factor in effect at `frame` (`1.0` means on plan).
    pub fn acceleration_at(&self, frame: u64) -> f64 {
        if self.catch_up.is_empty() {
            return 1.0;
        }
        let i = usize::try_from(frame)
            .unwrap_or(usize::MAX)
            .min(self.catch_up.len() - 1);
        self.catch_up[i]
    }

    /// Largest catch-up factor over the whole schedule.
    pub fn max_acceleration(&self) -> f64 {
        self.catch_up.last().copied().unwrap_or(1.0)
    }

    /// Visible fraction of `entry` at `frame`, in `[0, 1]`.
    pub fn progress(&self, entry: &ScheduleEntry, frame: u64) -> f64 {
        let window = entry.range();
        if frame < window.start.0 {
            return 0.0;
        }
        if !window.contains(FrameIndex(frame)) {
            return 1.0;
        }
        let duration = window.len_frames() as f64;
        let elapsed = (frame - window.start.0) as f64;
        let t = elapsed * self.acceleration_at(frame) / duration;
        if t >= 1.0 {
            return 1.0;
        }
        edge_ramp(t, self.edge)
    }
}

fn catch_up_table(entries: &[ScheduleEntry], budget: u64) -> Vec<f64> {
    let Ok(n) = usize::try_from(budget) else {
        return Vec::new();
    };
    if n == 0 || entries.is_empty() {
        return Vec::new();
    }

    // R(f) = pending(f) + active_end_sum(f) - f * active_count(f), built from difference arrays:
    // entries not yet started contribute their full window, running ones contribute `end - f`.
    let mut pending = vec![0.0_f64; n + 1];
    let mut count = vec![0.0_f64; n + 1];
    let mut end_sum = vec![0.0_f64; n + 1];
    for e in entries {
        let r = e.range();
        if r.is_empty() {
            continue;
        }
        let s = usize::try_from(r.start.0).unwrap_or(n).min(n);
        let end = usize::try_from(r.end.0).unwrap_or(n).min(n);
        if s >= end {
            continue;
        }
        let window = (end - s) as f64;
        pending[0] += window;
        pending[s] -= window;
        count[s] += 1.0;
        count[end] -= 1.0;
        end_sum[s] += end as f64;
        end_sum[end] -= end as f64;
    }

    let mut table = Vec::with_capacity(n);
    let (mut p, mut c, mut es) = (0.0, 0.0, 0.0);
    let mut factor = 1.0_f64;
    for f in 0..n {
        p += pending[f];
        c += count[f];
        es += end_sum[f];
        let remaining = p + es - f as f64 * c;
        let window = (n - f) as f64;
        if remaining > window {
            factor = factor.max(remaining / window);
        }
        table.push(factor);
    }
    table
}

#[cfg(test)]
#[path = "../../tests/unit/timing/sampler.rs"]
mod tests;
