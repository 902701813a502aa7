use image::RgbaImage;

use crate::foundation::core::{Canvas, Offset};
use crate::foundation::error::{GlitchError, GlitchResult};
use crate::foundation::math::wrap_source;

/// Copy of `img` with its content moved by `offset`; pixels leaving one edge re-enter on the
/// opposite edge.
pub fn offset_wrapped(img: &RgbaImage, offset: Offset) -> RgbaImage {
    let (w, h) = img.dimensions();
    RgbaImage::from_fn(w, h, |x, y| {
        *img.get_pixel(wrap_source(x, offset.dx, w), wrap_source(y, offset.dy, h))
    })
}

/// Chromatic split: the red plane moves by `offset`, the blue plane by `-offset`, green and
/// alpha stay put. Planes wrap at the edges like [`offset_wrapped`].
pub fn channel_glitch(img: &RgbaImage, offset: Offset) -> RgbaImage {
    let (w, h) = img.dimensions();
    let back = offset.neg();
    RgbaImage::from_fn(w, h, |x, y| {
        let here = img.get_pixel(x, y).0;
        let red = img
            .get_pixel(wrap_source(x, offset.dx, w), wrap_source(y, offset.dy, h))
            .0[0];
        let blue = img
            .get_pixel(wrap_source(x, back.dx, w), wrap_source(y, back.dy, h))
            .0[2];
        image::Rgba([red, here[1], blue, here[3]])
    })
}

/// Per-channel multiply (all four channels) against a flat color, truncating `a * b / 255`.
pub fn multiply_flat(img: &RgbaImage, rgba: [u8; 4]) -> RgbaImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        for (c, m) in px.0.iter_mut().zip(rgba) {
            *c = ((u16::from(*c) * u16::from(m)) / 255) as u8;
        }
    }
    out
}

/// Rotate the rows `y0..y0 + height` of an RGBA8 buffer horizontally by `shift` pixels,
/// wrapping at the left and right edges. Rows below the canvas are ignored.
pub fn slice_shift_in_place(
    data: &mut [u8],
    canvas: Canvas,
    y0: u32,
    height: u32,
    shift: i32,
) -> GlitchResult<()> {
    if data.len() != canvas.rgba_len() {
        return Err(GlitchError::validation(
            "slice shift expects a buffer matching width*height*4",
        ));
    }
    let w = canvas.width as usize;
    let k = i64::from(shift).rem_euclid(i64::from(canvas.width)) as usize;
    if k == 0 {
        return Ok(());
    }
    let y1 = y0.saturating_add(height).min(canvas.height);
    for y in y0..y1 {
        let start = (y as usize) * w * 4;
        data[start..start + w * 4].rotate_right(k * 4);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glitch.rs"]
mod tests;
