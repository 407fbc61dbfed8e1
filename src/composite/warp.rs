use std::f64::consts::PI;

use image::imageops::{self, FilterType};

use crate::foundation::core::{ALPHA, BoundingBox, ImageBuffer};
use crate::foundation::error::{DrinkError, DrinkResult};

/// Sinusoidal vertical displacement: `dy(x) = floor(sin(x / size * π) * amplitude) - lift`.
///
/// `lift` shifts the whole warp up so the curved top edge does not leave a gap under the
/// container rim.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WarpParams {
    pub amplitude: f64,
    pub lift: i64,
}

impl WarpParams {
    /// 256px cup: amplitude 30, lifted by half of it.
    pub const BASIC: Self = Self {
        amplitude: 30.0,
        lift: 15,
    };

    /// 512px glass: amplitude 70, lifted by 50.
    pub const EXTENDED: Self = Self {
        amplitude: 70.0,
        lift: 50,
    };

    /// Row offset applied to every pixel of column `x` in a buffer `size` pixels wide.
    ///
    /// Saturates at the `i64` range for extreme parameters.
    pub fn displacement(self, x: u32, size: u32) -> i64 {
        let t = f64::from(x) / f64::from(size.max(1));
        let wave = ((t * PI).sin() * self.amplitude).floor() as i64;
        wave.saturating_sub(self.lift)
    }
}

/// Crop + warp in one call.
pub fn warp_texture(
    texture: &ImageBuffer,
    bbox: BoundingBox,
    size: u32,
    params: WarpParams,
) -> DrinkResult<ImageBuffer> {
    let cropped = crop_into_bbox(texture, bbox, size)?;
    Ok(warp_vertical(&cropped, params))
}

/// Scale the whole `texture` into the `bbox` area of a fresh transparent `size × size` buffer.
///
/// A box with zero or negative width/height draws nothing. Destination pixels outside the
/// buffer are clipped.
pub fn crop_into_bbox(
    texture: &ImageBuffer,
    bbox: BoundingBox,
    size: u32,
) -> DrinkResult<ImageBuffer> {
    let mut out = ImageBuffer::new(size, size)?;
    if bbox.is_empty() || texture.pixel_count() == 0 {
        tracing::debug!(?bbox, "empty silhouette box, nothing to crop");
        return Ok(out);
    }

    let w = u32::try_from(bbox.width())
        .map_err(|_| DrinkError::validation("bounding box width does not fit in u32"))?;
    let h = u32::try_from(bbox.height())
        .map_err(|_| DrinkError::validation("bounding box height does not fit in u32"))?;

    let scaled = imageops::resize(&texture.to_rgba_image()?, w, h, FilterType::Triangle);
    for (dx, dy, px) in scaled.enumerate_pixels() {
        let Some(o) = out.offset_of(bbox.x1 + i64::from(dx), bbox.y1 + i64::from(dy)) else {
            continue;
        };
        out.as_bytes_mut()[o..o + 4].copy_from_slice(&px.0);
    }
    Ok(out)
}

/// Move every non-transparent pixel of `src` down by [`WarpParams::displacement`] of its column.
///
/// Reads from `src` untouched and writes into a copy of it, so source pixels that nothing lands
/// on keep their pre-warp content. Destinations outside the buffer are dropped.
pub fn warp_vertical(src: &ImageBuffer, params: WarpParams) -> ImageBuffer {
    let size = src.width();
    let mut out = src.clone();
    for (i, px) in src.pixels().enumerate() {
        if px[ALPHA] == 0 {
            continue;
        }
        let (x, y) = src.coords_of(i);
        let Some(dst_y) = i64::from(y).checked_add(params.displacement(x, size)) else {
            continue;
        };
        if let Some(o) = out.offset_of(i64::from(x), dst_y) {
            out.as_bytes_mut()[o..o + 4].copy_from_slice(px);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/composite/warp.rs"]
mod tests;
