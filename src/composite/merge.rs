use crate::foundation::core::{ALPHA, ImageBuffer};
use crate::foundation::error::DrinkResult;

/// Overlay alpha must be strictly above this for a pixel to replace the container's.
///
/// Below 255 so soft mask edges still land.
pub const MERGE_ALPHA_THRESHOLD: u8 = 240;

/// Copy of `container` with every pixel replaced by `overlay`'s where overlay alpha > 240.
pub fn merge_onto_container(
    container: &ImageBuffer,
    overlay: &ImageBuffer,
) -> DrinkResult<ImageBuffer> {
    container.ensure_same_size(overlay, "merge_onto_container")?;
    let mut out = container.clone();
    for (dst, src) in out.pixels_mut().zip(overlay.pixels()) {
        if src[ALPHA] > MERGE_ALPHA_THRESHOLD {
            dst.copy_from_slice(src);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/merge.rs"]
mod tests;
