use std::path::Path;

use anyhow::Context;
use image::RgbaImage;
use image::imageops::FilterType;

use crate::foundation::error::{GlitchError, GlitchResult};

/// Decode encoded image bytes into straight-alpha RGBA8.
///
/// Layers stay straight-alpha until they are composited, because the channel glitch shifts
/// color planes independently of alpha.
pub fn decode_image(bytes: &[u8]) -> GlitchResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(GlitchError::asset("decoded image has zero width or height"));
    }
    Ok(rgba)
}

/// Uniformly downscale `img` so its width is at most `max_width`. Never upscales.
pub fn fit_width(img: RgbaImage, max_width: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let scale = (f64::from(max_width) / f64::from(w)).min(1.0);
    if scale >= 1.0 {
        return img;
    }
    let nw = ((f64::from(w) * scale) as u32).max(1);
    let nh = ((f64::from(h) * scale) as u32).max(1);
    image::imageops::resize(&img, nw, nh, FilterType::Lanczos3)
}

/// Read, decode, and fit the logo raster.
#[tracing::instrument]
pub fn load_logo(path: &Path, max_width: u32) -> GlitchResult<RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read logo '{}'", path.display()))?;
    let img = decode_image(&bytes)?;
    let natural = img.dimensions();
    let img = fit_width(img, max_width);
    tracing::debug!(?natural, fitted = ?img.dimensions(), "logo prepared");
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
