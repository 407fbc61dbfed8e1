use crate::composite::warp::WarpParams;
use crate::foundation::error::{DrinkError, DrinkResult};

/// Which stage chain a run uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Crop + warp, single fill-mask overlay, merge. 256px assets.
    Basic,
    /// Crop + warp, shadow, reflection, merge. 512px assets.
    #[default]
    Extended,
}

impl Variant {
    pub fn default_size(self) -> u32 {
        match self {
            Variant::Basic => 256,
            Variant::Extended => 512,
        }
    }

    pub fn default_warp(self) -> WarpParams {
        match self {
            Variant::Basic => WarpParams::BASIC,
            Variant::Extended => WarpParams::EXTENDED,
        }
    }

    /// True if the shadow and reflection masks are required inputs.
    pub fn uses_shadow_and_reflection(self) -> bool {
        matches!(self, Variant::Extended)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Variant::Basic => "basic",
            Variant::Extended => "extended",
        })
    }
}

/// Run configuration. `size` and `warp` fall back to the variant's defaults when omitted.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub variant: Variant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warp: Option<WarpParams>,
}

impl PipelineConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            size: None,
            warp: None,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_warp(mut self, warp: WarpParams) -> Self {
        self.warp = Some(warp);
        self
    }

    /// Edge length every input buffer must have.
    pub fn size(&self) -> u32 {
        self.size.unwrap_or_else(|| self.variant.default_size())
    }

    pub fn warp(&self) -> WarpParams {
        self.warp.unwrap_or_else(|| self.variant.default_warp())
    }

    pub fn validate(&self) -> DrinkResult<()> {
        if self.size() == 0 {
            return Err(DrinkError::validation("pipeline size must be > 0"));
        }
        let warp = self.warp();
        if !warp.amplitude.is_finite() {
            return Err(DrinkError::validation("warp amplitude must be finite"));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> DrinkResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| DrinkError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
