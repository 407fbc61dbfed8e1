//! drinkmakr composites a liquid texture into a container picture.
//!
//! A run takes five straight-RGBA8 role pictures of one square size (container, fill mask,
//! shadow mask, reflection mask, texture) and produces one buffer of the same size:
//!
//! 1. **Locate**: alpha bounding box of the fill mask ([`locate_silhouette`])
//! 2. **Warp**: stretch the texture into the box, then bend it with a sine ([`warp_texture`])
//! 3. **Shade**: darken through the shadow mask ([`apply_shadow`], extended only)
//! 4. **Reflect**: brighten through the reflection mask and take its alpha
//!    ([`apply_reflection`]), or tint through the fill mask in the basic variant ([`overlay_fill`])
//! 5. **Merge**: copy near-opaque overlay pixels onto the container ([`merge_onto_container`])
//!
//! [`Pipeline`] runs the chain for a [`PipelineConfig`]. IO is front-loaded in [`AssetRoot`];
//! the stages themselves never touch the filesystem and are deterministic.
#![forbid(unsafe_code)]

mod assets;
mod composite;
mod foundation;
mod pipeline;

pub use assets::decode::{decode_image, decode_image_sized, encode_png, resize_square};
pub use assets::store::{AssetRoot, Recipe, Role, normalize_rel_path};
pub use composite::merge::{MERGE_ALPHA_THRESHOLD, merge_onto_container};
pub use composite::shading::{
    REFLECTION_MAX_BRIGHTEN, SHADOW_MAX_DARKEN, apply_reflection, apply_shadow, overlay_fill,
};
pub use composite::silhouette::locate_silhouette;
pub use composite::warp::{WarpParams, crop_into_bbox, warp_texture, warp_vertical};
pub use foundation::core::{ALPHA, BoundingBox, ImageBuffer, Rgba8};
pub use foundation::error::{DrinkError, DrinkResult};
pub use pipeline::config::{PipelineConfig, Variant};
pub use pipeline::orchestrator::{Pipeline, PipelineInputs, PipelineTrace, compose};
