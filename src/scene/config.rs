use crate::foundation::error::WhiteboardResult;
use crate::geometry::artifact::ArtifactThresholds;
use crate::geometry::autofit::AutoFitConfig;
use crate::geometry::length::LengthConfig;
use crate::timing::sampler::SamplerConfig;
use crate::timing::schedule::ScheduleConfig;

/// Colour-fill pass that follows each closed, filled outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FillConfig {
    /// Frames over which a fill fades in after its outline completes. `0` shows it at once.
    pub fade_frames: u64,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self { fade_frames: 12 }
    }
}

/// All tunable engine constants. Every field falls back to its reference default.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Length estimation.
    pub length: LengthConfig,
    /// Artifact filtering.
    pub artifacts: ArtifactThresholds,
    /// Reveal scheduling.
    pub schedule: ScheduleConfig,
    /// Progress sampling.
    pub sampler: SamplerConfig,
    /// Content framing.
    pub autofit: AutoFitConfig,
    /// Fill pass.
    pub fill: FillConfig,
}

impl EngineConfig {
    /// Reject non-finite or out-of-range constants.
    pub fn validate(&self) -> WhiteboardResult<()> {
        self.length.validate()?;
        self.artifacts.validate()?;
        self.schedule.validate()?;
        self.sampler.validate()?;
        self.autofit.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
