pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Source coordinate for destination `x` after shifting a row of length `len` by `shift`,
/// wrapping around the edges.
pub(crate) fn wrap_source(x: u32, shift: i32, len: u32) -> u32 {
    debug_assert!(len > 0);
    (i64::from(x) - i64::from(shift)).rem_euclid(i64::from(len)) as u32
}

/// `round(sin(t) * amplitude)` as a pixel displacement.
pub(crate) fn sin_px(t: f64, amplitude: f64) -> i32 {
    (t.sin() * amplitude).round() as i32
}

/// `round(cos(t) * amplitude)` as a pixel displacement.
pub(crate) fn cos_px(t: f64, amplitude: f64) -> i32 {
    (t.cos() * amplitude).round() as i32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
