use crate::foundation::error::{DrinkError, DrinkResult};
use crate::foundation::math::rgba_len;

/// One straight (non-premultiplied) RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Index of the alpha byte within a pixel.
pub const ALPHA: usize = 3;

/// Fixed-size straight RGBA8 pixel grid, row-major, tightly packed.
///
/// `data.len() == width * height * 4` holds for every constructed value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> DrinkResult<Self> {
        let len = rgba_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Buffer with every pixel set to `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> DrinkResult<Self> {
        let len = rgba_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: px.repeat(len / 4),
        })
    }

    /// Wrap raw RGBA8 bytes, checking the length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> DrinkResult<Self> {
        let expected = rgba_len(width, height)?;
        if data.len() != expected {
            return Err(DrinkError::validation(format!(
                "rgba buffer of {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True if this is an `size × size` buffer.
    pub fn is_square_of(&self, size: u32) -> bool {
        self.width == size && self.height == size
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Pixel coordinates for a pixel ordinal (`byte index / 4`).
    pub fn coords_of(&self, pixel: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((pixel % w) as u32, (pixel / w) as u32)
    }

    /// Byte offset of `(x, y)`, or `None` outside the grid.
    pub fn offset_of(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let i = self.offset_of(i64::from(x), i64::from(y))?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Write a pixel; returns `false` and leaves the buffer untouched outside the grid.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8) -> bool {
        match self.offset_of(i64::from(x), i64::from(y)) {
            Some(i) => {
                self.data[i..i + 4].copy_from_slice(&px);
                true
            }
            None => false,
        }
    }

    /// Alpha of the `n`-th pixel in row-major order.
    pub fn alpha_of(&self, pixel: usize) -> u8 {
        self.data[pixel * 4 + ALPHA]
    }

    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(4)
    }

    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(4)
    }

    /// Copy into an `image::RgbaImage` for encoding or resampling.
    pub fn to_rgba_image(&self) -> DrinkResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| DrinkError::validation("rgba buffer does not match its dimensions"))
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Error unless `other` has the same dimensions as `self`.
    pub fn ensure_same_size(&self, other: &ImageBuffer, what: &str) -> DrinkResult<()> {
        if self.dimensions() != other.dimensions() {
            return Err(DrinkError::validation(format!(
                "{what} expects equal-size rgba8 buffers, got {}x{} and {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        Ok(())
    }
}

/// Tight box around the opaque pixels of a silhouette, in pixel coordinates.
///
/// `width()`/`height()` are `x2 - x1` / `y2 - y1`; an empty mask leaves them at zero or below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub x1: i64,
    pub x2: i64,
    pub y1: i64,
    pub y2: i64,
}

impl BoundingBox {
    pub fn width(self) -> i64 {
        self.x2 - self.x1
    }

    pub fn height(self) -> i64 {
        self.y2 - self.y1
    }

    /// True when the box has no drawable area.
    pub fn is_empty(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Inclusive containment on both axes.
    pub fn contains(self, x: i64, y: i64) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
