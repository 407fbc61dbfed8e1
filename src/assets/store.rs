use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use rayon::prelude::*;

use crate::assets::decode::decode_image_sized;
use crate::foundation::core::ImageBuffer;
use crate::foundation::error::{DrinkError, DrinkResult};
use crate::pipeline::config::{PipelineConfig, Variant};
use crate::pipeline::orchestrator::PipelineInputs;

/// What a source picture is used for in a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Container,
    FillMask,
    ShadowMask,
    ReflectionMask,
    Texture,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Container => "container",
            Role::FillMask => "fill_mask",
            Role::ShadowMask => "shadow_mask",
            Role::ReflectionMask => "reflection_mask",
            Role::Texture => "texture",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON description of one composite: pipeline settings plus the relative paths of the role
/// pictures.
///
/// `fill_mask` may be omitted for the extended variant, in which case the reflection overlay's
/// alpha doubles as the silhouette.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    pub container: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection_mask: Option<String>,
    pub texture: String,
}

impl Recipe {
    pub fn from_json_str(s: &str) -> DrinkResult<Self> {
        let recipe: Self = serde_json::from_str(s).map_err(|e| DrinkError::serde(e.to_string()))?;
        recipe.validate()?;
        Ok(recipe)
    }

    pub fn from_path(path: &Path) -> DrinkResult<Self> {
        let f = File::open(path).with_context(|| format!("open recipe '{}'", path.display()))?;
        let recipe: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| DrinkError::serde(format!("parse recipe '{}': {e}", path.display())))?;
        recipe.validate()?;
        Ok(recipe)
    }

    pub fn validate(&self) -> DrinkResult<()> {
        self.pipeline.validate()?;
        self.sources().map(|_| ())
    }

    /// Normalized `(role, path)` pairs to load. Only explicitly named pictures are listed.
    pub fn sources(&self) -> DrinkResult<Vec<(Role, String)>> {
        let variant = self.pipeline.variant;
        let mut out = vec![
            (Role::Container, normalize_rel_path(&self.container)?),
            (Role::Texture, normalize_rel_path(&self.texture)?),
        ];
        let optional = [
            (Role::FillMask, &self.fill_mask),
            (Role::ShadowMask, &self.shadow_mask),
            (Role::ReflectionMask, &self.reflection_mask),
        ];
        for (role, path) in optional {
            if let Some(p) = path {
                out.push((role, normalize_rel_path(p)?));
            }
        }

        match variant {
            Variant::Basic if self.fill_mask.is_none() => {
                return Err(DrinkError::validation(
                    "basic recipe requires a fill_mask",
                ));
            }
            Variant::Extended if self.shadow_mask.is_none() || self.reflection_mask.is_none() => {
                return Err(DrinkError::validation(
                    "extended recipe requires shadow_mask and reflection_mask",
                ));
            }
            _ => {}
        }
        Ok(out)
    }
}

/// Filesystem root that recipe paths are resolved against.
#[derive(Clone, Debug)]
pub struct AssetRoot {
    root: PathBuf,
}

impl AssetRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_bytes(&self, norm_path: &str) -> DrinkResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(DrinkError::from)
    }

    /// Read, decode and stretch one picture to `size × size`.
    pub fn load_sized(&self, norm_path: &str, size: u32) -> DrinkResult<ImageBuffer> {
        let bytes = self.read_bytes(norm_path)?;
        decode_image_sized(&bytes, size)
    }

    /// Load every picture of `recipe` concurrently and return once all of them are decoded.
    ///
    /// Either every role is available or the first failure is returned; the pipeline never
    /// sees a partial set.
    #[tracing::instrument(skip(self, recipe), fields(root = %self.root.display(), variant = %recipe.pipeline.variant))]
    pub fn load_inputs(&self, recipe: &Recipe) -> DrinkResult<PipelineInputs> {
        let size = recipe.pipeline.size();
        let sources = recipe.sources()?;

        let loaded: Vec<(Role, ImageBuffer)> = sources
            .par_iter()
            .map(|(role, path)| -> DrinkResult<(Role, ImageBuffer)> {
                let buf = self.load_sized(path, size).map_err(|e| {
                    DrinkError::asset(format!("load {role} from '{path}': {e:#}"))
                })?;
                tracing::debug!(%role, path = %path, size, "decoded");
                Ok((*role, buf))
            })
            .collect::<DrinkResult<_>>()?;

        let mut container = None;
        let mut fill_mask = None;
        let mut shadow_mask = None;
        let mut reflection_mask = None;
        let mut texture = None;
        for (role, buf) in loaded {
            let slot = match role {
                Role::Container => &mut container,
                Role::FillMask => &mut fill_mask,
                Role::ShadowMask => &mut shadow_mask,
                Role::ReflectionMask => &mut reflection_mask,
                Role::Texture => &mut texture,
            };
            *slot = Some(buf);
        }

        let fill_mask = fill_mask
            .or_else(|| reflection_mask.clone())
            .ok_or_else(|| DrinkError::validation("recipe resolves no fill_mask"))?;

        Ok(PipelineInputs {
            container: container
                .ok_or_else(|| DrinkError::validation("recipe resolves no container"))?,
            fill_mask,
            shadow_mask,
            reflection_mask,
            texture: texture
                .ok_or_else(|| DrinkError::validation("recipe resolves no texture"))?,
        })
    }
}

/// Normalize a recipe path to `a/b/c.png` form; absolute paths and `..` are rejected.
pub fn normalize_rel_path(source: &str) -> DrinkResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(DrinkError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(DrinkError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(DrinkError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(DrinkError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
