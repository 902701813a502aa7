use image::RgbaImage;

use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{GlitchError, GlitchResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(src[i], dc);
    }
    out
}

/// Composite a straight-alpha layer onto a premultiplied canvas buffer with its top-left corner
/// at `(x, y)`. Parts of the layer outside the canvas are clipped.
pub fn paste_over(
    dst: &mut [u8],
    canvas: Canvas,
    layer: &RgbaImage,
    x: i64,
    y: i64,
) -> GlitchResult<()> {
    check_len(dst, canvas, "paste_over")?;
    let (lw, lh) = layer.dimensions();
    let cw = i64::from(canvas.width);
    let ch = i64::from(canvas.height);

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(lw)).min(cw);
    let y1 = (y + i64::from(lh)).min(ch);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    for cy in y0..y1 {
        let ly = (cy - y) as u32;
        for cx in x0..x1 {
            let [r, g, b, a] = layer.get_pixel((cx - x) as u32, ly).0;
            if a == 0 {
                continue;
            }
            let src = Rgba8Premul::from_straight_rgba(r, g, b, a).to_array();
            let idx = ((cy * cw + cx) * 4) as usize;
            let d = [dst[idx], dst[idx + 1], dst[idx + 2], dst[idx + 3]];
            dst[idx..idx + 4].copy_from_slice(&over(d, src));
        }
    }
    Ok(())
}

/// Fill every pixel with a single premultiplied color.
pub fn fill(dst: &mut [u8], canvas: Canvas, color: Rgba8Premul) -> GlitchResult<()> {
    check_len(dst, canvas, "fill")?;
    let px = color.to_array();
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
    Ok(())
}

/// Composite `color` at `opacity` over full-width rows `0, spacing, 2 * spacing, ..`.
pub fn scanlines_over(
    dst: &mut [u8],
    canvas: Canvas,
    spacing: u32,
    color: [u8; 3],
    opacity: u8,
) -> GlitchResult<()> {
    check_len(dst, canvas, "scanlines_over")?;
    if spacing == 0 {
        return Err(GlitchError::validation("scan line spacing must be > 0"));
    }
    let src = Rgba8Premul::from_straight_rgba(color[0], color[1], color[2], opacity).to_array();
    let row_len = canvas.width as usize * 4;
    for y in (0..canvas.height).step_by(spacing as usize) {
        let start = y as usize * row_len;
        for d in dst[start..start + row_len].chunks_exact_mut(4) {
            let out = over([d[0], d[1], d[2], d[3]], src);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

fn check_len(dst: &[u8], canvas: Canvas, op: &str) -> GlitchResult<()> {
    if dst.len() != canvas.rgba_len() {
        return Err(GlitchError::validation(format!(
            "{op} expects a buffer matching width*height*4"
        )));
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
