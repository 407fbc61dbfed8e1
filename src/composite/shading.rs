use crate::foundation::core::{ALPHA, ImageBuffer};
use crate::foundation::error::DrinkResult;
use crate::foundation::math::{store_channel, unit};

/// Largest amount a shadow-mask pixel can darken a channel by.
pub const SHADOW_MAX_DARKEN: f64 = 150.0;

/// Largest amount a reflection-mask pixel can brighten a channel by.
pub const REFLECTION_MAX_BRIGHTEN: f64 = 50.0;

/// Darken RGB wherever the shadow mask has alpha > 0.
///
/// Per channel: `c - (150 - mask_c / 255 * 150)`, so a white mask leaves the pixel alone and a
/// black one takes the full 150 off. Alpha and unmasked pixels are untouched.
pub fn apply_shadow(mut warped: ImageBuffer, shadow_mask: &ImageBuffer) -> DrinkResult<ImageBuffer> {
    warped.ensure_same_size(shadow_mask, "apply_shadow")?;
    for (dst, mask) in warped.pixels_mut().zip(shadow_mask.pixels()) {
        if mask[ALPHA] == 0 {
            continue;
        }
        for c in 0..3 {
            let darken = SHADOW_MAX_DARKEN - unit(mask[c]) * SHADOW_MAX_DARKEN;
            dst[c] = store_channel(f64::from(dst[c]) - darken);
        }
    }
    Ok(warped)
}

/// Brighten RGB by up to 50 from the reflection mask and take its alpha as the new alpha.
///
/// Runs over every pixel with no alpha gate: anything outside the mask's silhouette ends up
/// transparent.
pub fn apply_reflection(
    mut shaded: ImageBuffer,
    reflection_mask: &ImageBuffer,
) -> DrinkResult<ImageBuffer> {
    shaded.ensure_same_size(reflection_mask, "apply_reflection")?;
    for (dst, mask) in shaded.pixels_mut().zip(reflection_mask.pixels()) {
        for c in 0..3 {
            let brighten = unit(mask[c]) * REFLECTION_MAX_BRIGHTEN;
            dst[c] = store_channel(f64::from(dst[c]) + brighten);
        }
        dst[ALPHA] = mask[ALPHA];
    }
    Ok(shaded)
}

/// Single-overlay tint used when there are no separate shadow/reflection masks.
///
/// `factor = avg(mask rgb) / 255`; each channel gains `mask_c * factor`; alpha comes from the
/// mask.
pub fn overlay_fill(mut warped: ImageBuffer, fill_mask: &ImageBuffer) -> DrinkResult<ImageBuffer> {
    warped.ensure_same_size(fill_mask, "overlay_fill")?;
    for (dst, mask) in warped.pixels_mut().zip(fill_mask.pixels()) {
        let avg = (f64::from(mask[0]) + f64::from(mask[1]) + f64::from(mask[2])) / 3.0;
        let factor = avg / 255.0;
        for c in 0..3 {
            dst[c] = store_channel(f64::from(dst[c]) + f64::from(mask[c]) * factor);
        }
        dst[ALPHA] = mask[ALPHA];
    }
    Ok(warped)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/shading.rs"]
mod tests;
