use crate::foundation::error::{DrinkError, DrinkResult};

/// Byte length of a tightly packed RGBA8 grid, or an error if it does not fit in `usize`.
pub(crate) fn rgba_len(width: u32, height: u32) -> DrinkResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DrinkError::validation("rgba buffer size overflow"))
}

/// Normalize a channel byte to `0.0..=1.0`.
pub(crate) fn unit(v: u8) -> f64 {
    f64::from(v) / 255.0
}

/// Store a computed channel value into a byte: round half to even, then clamp to `0..=255`.
///
/// Matches what a clamped byte array does on assignment, so shading that over- or undershoots
/// saturates instead of wrapping.
pub(crate) fn store_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
