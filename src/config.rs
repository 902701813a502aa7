use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::gif::delay_centiseconds;
use crate::foundation::core::Canvas;
use crate::foundation::error::{GlitchError, GlitchResult};

/// Font request for the text label.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Font file name, looked up in the assets root and `<root>/fonts/`.
    pub file: String,
    /// Family name used when searching system fonts.
    pub family: String,
    /// Requested weight (CSS scale, 700 = bold).
    pub weight: u16,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            file: "DejaVuSans-Bold.ttf".to_string(),
            family: "DejaVu Sans".to_string(),
            weight: 700,
            size: 56.0,
        }
    }
}

/// Every constant the generator uses.
///
/// `BannerConfig::default()` reproduces the canonical banner; callers (and tests) can tweak
/// individual fields and pass the value explicitly into the pipeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub canvas: Canvas,
    pub frame_count: u32,
    /// Display duration of each frame.
    pub frame_delay_ms: u32,

    pub background: [u8; 3],
    pub text: String,
    pub text_color: [u8; 3],
    /// Transparent padding around the rendered text ink box.
    pub text_padding: u32,
    pub font: FontSpec,

    /// Drop-shadow tint and alpha, multiplied into the offset text.
    pub shadow_rgba: [u8; 4],
    pub shadow_offset: (i32, i32),

    /// Horizontal space kept free around the logo; max logo width is `canvas.width - logo_margin`.
    pub logo_margin: u32,
    pub logo_top: i32,
    /// Gap between the right canvas edge and the text raster.
    pub text_right_margin: i32,

    pub bob_amplitude: f64,
    pub glitch_amplitude_x: f64,
    pub glitch_amplitude_y: f64,

    /// Slice shift runs on frames where `index % slice_period == 0`.
    pub slice_period: u32,
    pub slice_height: u32,
    /// Per-frame vertical stride of the slice band.
    pub slice_stride: u32,
    /// Horizontal slice displacement is `dx * slice_shift_factor`.
    pub slice_shift_factor: i32,

    pub scanline_spacing: u32,
    pub scanline_opacity: u8,

    /// Logo image, relative to the assets root.
    pub logo_path: PathBuf,
    /// Output GIF, relative to the assets root.
    pub out_path: PathBuf,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 720,
                height: 520,
            },
            frame_count: 14,
            frame_delay_ms: 70,
            background: [6, 7, 13],
            text: "deepkrak3n".to_string(),
            text_color: [230, 236, 255],
            text_padding: 6,
            font: FontSpec::default(),
            shadow_rgba: [20, 24, 36, 130],
            shadow_offset: (2, 2),
            logo_margin: 160,
            logo_top: 26,
            text_right_margin: 38,
            bob_amplitude: 2.0,
            glitch_amplitude_x: 3.0,
            glitch_amplitude_y: 2.0,
            slice_period: 3,
            slice_height: 12,
            slice_stride: 23,
            slice_shift_factor: 3,
            scanline_spacing: 3,
            scanline_opacity: 26,
            logo_path: PathBuf::from("deepkrak3nlogo.png"),
            out_path: PathBuf::from("public").join("deepkrak3n-glitch.gif"),
        }
    }
}

impl BannerConfig {
    /// Load a config from a JSON file. Missing fields keep their default values.
    pub fn from_path(path: &Path) -> GlitchResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes).map_err(|e| {
            GlitchError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> GlitchResult<()> {
        self.canvas.validate()?;
        if self.frame_count == 0 {
            return Err(GlitchError::validation("frame_count must be >= 1"));
        }
        delay_centiseconds(self.frame_delay_ms)?;
        if self.slice_period == 0 {
            return Err(GlitchError::validation("slice_period must be > 0"));
        }
        if self.slice_height == 0 || self.slice_height >= self.canvas.height {
            return Err(GlitchError::validation(
                "slice_height must be > 0 and smaller than the canvas height",
            ));
        }
        if self.scanline_spacing == 0 {
            return Err(GlitchError::validation("scanline_spacing must be > 0"));
        }
        if self.logo_margin >= self.canvas.width {
            return Err(GlitchError::validation(
                "logo_margin must be smaller than the canvas width",
            ));
        }
        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            return Err(GlitchError::validation("font size must be a positive number"));
        }
        if self.text.is_empty() {
            return Err(GlitchError::validation("text must be non-empty"));
        }
        Ok(())
    }

    /// Maximum logo width before downscaling kicks in.
    pub fn max_logo_width(&self) -> u32 {
        self.canvas.width - self.logo_margin
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
