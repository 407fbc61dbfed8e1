use std::io::Cursor;

use anyhow::Context;
use image::imageops::{self, FilterType};

use crate::foundation::core::ImageBuffer;
use crate::foundation::error::DrinkResult;

/// Decode any format the `image` crate understands into straight RGBA8 at native size.
pub fn decode_image(bytes: &[u8]) -> DrinkResult<ImageBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(ImageBuffer::from_rgba_image(dyn_img.to_rgba8()))
}

/// Decode and stretch to `size × size`, the way every role picture is drawn onto its surface.
pub fn decode_image_sized(bytes: &[u8], size: u32) -> DrinkResult<ImageBuffer> {
    resize_square(decode_image(bytes)?, size)
}

/// Bilinear resize to `size × size`; a no-op when the buffer already has that size.
pub fn resize_square(buf: ImageBuffer, size: u32) -> DrinkResult<ImageBuffer> {
    if buf.is_square_of(size) {
        return Ok(buf);
    }
    let img = buf.to_rgba_image()?;
    Ok(ImageBuffer::from_rgba_image(imageops::resize(
        &img,
        size,
        size,
        FilterType::Triangle,
    )))
}

/// PNG bytes for `buf`.
pub fn encode_png(buf: &ImageBuffer) -> DrinkResult<Vec<u8>> {
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(buf.to_rgba_image()?)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
