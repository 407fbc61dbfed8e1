use crate::foundation::core::{ALPHA, BoundingBox, ImageBuffer};

/// Tight bounding box of every pixel with alpha > 0 in `mask`.
///
/// The four edges come from four independent scans over the pixel order. The descending scans
/// start at the last pixel of the buffer and include pixel 0. An all-transparent mask yields
/// `{x1: width, x2: 0, y1: 0, y2: 0}`: negative width, zero height.
pub fn locate_silhouette(mask: &ImageBuffer) -> BoundingBox {
    let width = i64::from(mask.width());
    let opaque = |px: &[u8]| px[ALPHA] > 0;
    let row = |i: usize| (i as i64) / width.max(1);
    let col = |i: usize| (i as i64) % width.max(1);

    let y1 = mask.pixels().position(opaque).map(row).unwrap_or(0);
    let y2 = mask.pixels().rposition(opaque).map(row).unwrap_or(0);

    let mut x1 = width;
    for (i, px) in mask.pixels().enumerate() {
        if opaque(px) {
            x1 = x1.min(col(i));
        }
    }

    let mut x2 = 0;
    for (i, px) in mask.pixels().enumerate().rev() {
        if opaque(px) {
            x2 = x2.max(col(i));
        }
    }

    BoundingBox { x1, x2, y1, y2 }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/silhouette.rs"]
mod tests;
