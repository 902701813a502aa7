use image::RgbaImage;

use crate::effects::composite::{fill, paste_over, scanlines_over};
use crate::effects::glitch::slice_shift_in_place;
use crate::encode::quantize::{IndexedFrame, quantize_adaptive};
use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::GlitchResult;
use crate::render::motion::SliceShift;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Layered drawing onto one canvas.
///
/// Starts as an opaque background, accumulates layers in call order, and is consumed by
/// [`FrameBuilder::finish`] so a spent canvas cannot be drawn on again.
#[derive(Debug)]
pub struct FrameBuilder {
    canvas: Canvas,
    background: [u8; 3],
    data: Vec<u8>,
}

impl FrameBuilder {
    /// New canvas filled with the opaque `background` color.
    pub fn new(canvas: Canvas, background: [u8; 3]) -> GlitchResult<Self> {
        canvas.validate()?;
        let mut data = vec![0u8; canvas.rgba_len()];
        fill(&mut data, canvas, Rgba8Premul::opaque(background))?;
        Ok(Self {
            canvas,
            background,
            data,
        })
    }

    /// Source-over a straight-alpha layer with its top-left corner at `(x, y)`.
    pub fn paste(&mut self, layer: &RgbaImage, x: i64, y: i64) -> GlitchResult<&mut Self> {
        paste_over(&mut self.data, self.canvas, layer, x, y)?;
        Ok(self)
    }

    /// Replace a horizontal band with a wrapped, horizontally shifted copy of itself.
    pub fn slice_shift(&mut self, slice: SliceShift) -> GlitchResult<&mut Self> {
        slice_shift_in_place(
            &mut self.data,
            self.canvas,
            slice.y0,
            slice.height,
            slice.shift,
        )?;
        Ok(self)
    }

    /// White scan lines at `opacity` on every `spacing`-th row.
    pub fn scanlines(&mut self, spacing: u32, opacity: u8) -> GlitchResult<&mut Self> {
        scanlines_over(&mut self.data, self.canvas, spacing, [255, 255, 255], opacity)?;
        Ok(self)
    }

    /// Stop drawing and hand out the raw pixels.
    pub fn into_rgba(self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.data,
            premultiplied: true,
        }
    }

    /// Quantize the finished canvas to an adaptive palette with transparent index 0.
    pub fn finish(self) -> GlitchResult<IndexedFrame> {
        let background = self.background;
        quantize_adaptive(&self.into_rgba(), background)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
