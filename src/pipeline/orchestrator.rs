use crate::composite::{
    merge::merge_onto_container,
    shading::{apply_reflection, apply_shadow, overlay_fill},
    silhouette::locate_silhouette,
    warp::{crop_into_bbox, warp_vertical},
};
use crate::foundation::core::{BoundingBox, ImageBuffer};
use crate::foundation::error::{DrinkError, DrinkResult};
use crate::pipeline::config::{PipelineConfig, Variant};

/// The role buffers one composite run reads. All of them must be `size × size`.
#[derive(Clone, Debug)]
pub struct PipelineInputs {
    /// Empty container picture the liquid is merged onto.
    pub container: ImageBuffer,
    /// Silhouette of the liquid-visible area; also the tint overlay in the basic variant.
    pub fill_mask: ImageBuffer,
    /// Extended only.
    pub shadow_mask: Option<ImageBuffer>,
    /// Extended only. Its alpha decides final visibility.
    pub reflection_mask: Option<ImageBuffer>,
    /// Liquid pattern stretched into the silhouette box.
    pub texture: ImageBuffer,
}

/// Every intermediate buffer of a run, in stage order.
#[derive(Clone, Debug)]
pub struct PipelineTrace {
    pub bbox: BoundingBox,
    pub cropped: ImageBuffer,
    pub warped: ImageBuffer,
    /// `None` for the basic variant.
    pub shaded: Option<ImageBuffer>,
    pub overlay: ImageBuffer,
    pub result: ImageBuffer,
}

/// One parameterized compositing pipeline for both variants.
///
/// Holds configuration only; every run starts from the given inputs and shares nothing with
/// previous runs.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> DrinkResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fail fast unless every provided buffer is `size × size` and the variant's masks exist.
    pub fn validate_inputs(&self, inputs: &PipelineInputs) -> DrinkResult<()> {
        let size = self.config.size();
        let mut roles: Vec<(&str, &ImageBuffer)> = vec![
            ("container", &inputs.container),
            ("fill_mask", &inputs.fill_mask),
            ("texture", &inputs.texture),
        ];
        if let Some(m) = &inputs.shadow_mask {
            roles.push(("shadow_mask", m));
        }
        if let Some(m) = &inputs.reflection_mask {
            roles.push(("reflection_mask", m));
        }
        for (role, buf) in roles {
            if !buf.is_square_of(size) {
                return Err(DrinkError::validation(format!(
                    "{role} must be {size}x{size}, got {}x{}",
                    buf.width(),
                    buf.height()
                )));
            }
        }

        if self.config.variant.uses_shadow_and_reflection() {
            if inputs.shadow_mask.is_none() {
                return Err(DrinkError::validation(
                    "extended variant requires a shadow_mask",
                ));
            }
            if inputs.reflection_mask.is_none() {
                return Err(DrinkError::validation(
                    "extended variant requires a reflection_mask",
                ));
            }
        }
        Ok(())
    }

    /// Run every stage and return only the merged result.
    #[tracing::instrument(skip(self, inputs), fields(variant = %self.config.variant, size = self.config.size()))]
    pub fn run(&self, inputs: &PipelineInputs) -> DrinkResult<ImageBuffer> {
        self.validate_inputs(inputs)?;
        let bbox = self.locate(inputs);
        let cropped = crop_into_bbox(&inputs.texture, bbox, self.config.size())?;
        let warped = warp_vertical(&cropped, self.config.warp());
        let (_, overlay) = self.shade(warped, inputs, false)?;
        merge_onto_container(&inputs.container, &overlay)
    }

    /// Like [`Pipeline::run`], but keeps a copy of every intermediate buffer.
    #[tracing::instrument(skip(self, inputs), fields(variant = %self.config.variant, size = self.config.size()))]
    pub fn run_traced(&self, inputs: &PipelineInputs) -> DrinkResult<PipelineTrace> {
        self.validate_inputs(inputs)?;
        let bbox = self.locate(inputs);
        let cropped = crop_into_bbox(&inputs.texture, bbox, self.config.size())?;
        let warped = warp_vertical(&cropped, self.config.warp());
        let (shaded, overlay) = self.shade(warped.clone(), inputs, true)?;
        let result = merge_onto_container(&inputs.container, &overlay)?;
        Ok(PipelineTrace {
            bbox,
            cropped,
            warped,
            shaded,
            overlay,
            result,
        })
    }

    fn locate(&self, inputs: &PipelineInputs) -> BoundingBox {
        let bbox = locate_silhouette(&inputs.fill_mask);
        if bbox.is_empty() {
            tracing::warn!(?bbox, "fill mask has no drawable silhouette, container is left as is");
        } else {
            tracing::debug!(?bbox, "located silhouette");
        }
        bbox
    }

    /// Returns `(shaded, overlay)`; `shaded` is only kept when `keep_shaded` is set.
    fn shade(
        &self,
        warped: ImageBuffer,
        inputs: &PipelineInputs,
        keep_shaded: bool,
    ) -> DrinkResult<(Option<ImageBuffer>, ImageBuffer)> {
        match self.config.variant {
            Variant::Basic => {
                if inputs.shadow_mask.is_some() || inputs.reflection_mask.is_some() {
                    tracing::debug!("basic variant ignores shadow/reflection masks");
                }
                Ok((None, overlay_fill(warped, &inputs.fill_mask)?))
            }
            Variant::Extended => {
                let (Some(shadow), Some(reflection)) =
                    (&inputs.shadow_mask, &inputs.reflection_mask)
                else {
                    return Err(DrinkError::validation(
                        "extended variant requires shadow_mask and reflection_mask",
                    ));
                };
                let shaded = apply_shadow(warped, shadow)?;
                let kept = keep_shaded.then(|| shaded.clone());
                let overlay = apply_reflection(shaded, reflection)?;
                Ok((kept, overlay))
            }
        }
    }
}

/// Build a [`Pipeline`] for `config` and run it once.
pub fn compose(config: PipelineConfig, inputs: &PipelineInputs) -> DrinkResult<ImageBuffer> {
    Pipeline::new(config)?.run(inputs)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/orchestrator.rs"]
mod tests;
