use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::assets::decode::load_logo;
use crate::assets::font::{FontSearch, resolve_font};
use crate::assets::text::render_text;
use crate::config::BannerConfig;
use crate::effects::glitch::{channel_glitch, multiply_flat, offset_wrapped};
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::quantize::IndexedFrame;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Offset};
use crate::foundation::error::GlitchResult;
use crate::render::frame::FrameBuilder;
use crate::render::motion::FrameMotion;

/// Rasters that do not change between frames.
#[derive(Clone, Debug)]
pub struct BannerAssets {
    /// Logo, straight alpha, already fitted to the maximum logo width.
    pub logo: RgbaImage,
    /// Text label with transparent padding around its ink box.
    pub text: RgbaImage,
    /// Tinted, offset copy of `text` drawn beneath the glitched label.
    pub shadow: RgbaImage,
    /// `true` when the label was drawn with the built-in bitmap font.
    pub builtin_font: bool,
}

/// Load the logo, resolve the font and render the label plus its shadow.
///
/// Relative `logo_path` values are resolved against `root`. A missing logo is an error; a
/// missing font is not.
#[tracing::instrument(skip(cfg))]
pub fn prepare_assets(
    cfg: &BannerConfig,
    root: &Path,
    search: FontSearch,
) -> GlitchResult<BannerAssets> {
    cfg.validate()?;
    let logo = load_logo(&root.join(&cfg.logo_path), cfg.max_logo_width())?;

    let font = resolve_font(&cfg.font, root, search);
    let text = render_text(
        &cfg.text,
        &font,
        cfg.font.size,
        cfg.text_color,
        cfg.text_padding,
    )?;

    let (sx, sy) = cfg.shadow_offset;
    let shadow = multiply_flat(&offset_wrapped(&text, Offset::new(sx, sy)), cfg.shadow_rgba);

    tracing::info!(
        logo_w = logo.width(),
        logo_h = logo.height(),
        text_w = text.width(),
        text_h = text.height(),
        builtin_font = font.is_builtin(),
        "assets prepared"
    );
    Ok(BannerAssets {
        logo,
        text,
        shadow,
        builtin_font: font.is_builtin(),
    })
}

/// Top-left positions of the logo and the label, before the per-frame bob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub logo_x: i64,
    pub logo_y: i64,
    pub text_x: i64,
    pub text_y: i64,
}

impl Layout {
    /// Logo centred horizontally at `logo_top`; label right-aligned and vertically centred on
    /// the logo.
    pub fn new(cfg: &BannerConfig, assets: &BannerAssets) -> Self {
        let w = i64::from(cfg.canvas.width);
        let (lw, lh) = (
            i64::from(assets.logo.width()),
            i64::from(assets.logo.height()),
        );
        let (tw, th) = (
            i64::from(assets.text.width()),
            i64::from(assets.text.height()),
        );

        let logo_x = (w - lw).div_euclid(2);
        let logo_y = i64::from(cfg.logo_top);
        Self {
            logo_x,
            logo_y,
            text_x: w - tw - i64::from(cfg.text_right_margin),
            text_y: logo_y + lh / 2 - th / 2,
        }
    }
}

/// Composite frame `idx` without quantizing it.
pub fn compose_frame(
    cfg: &BannerConfig,
    assets: &BannerAssets,
    idx: FrameIndex,
) -> GlitchResult<FrameBuilder> {
    let layout = Layout::new(cfg, assets);
    let motion = FrameMotion::at(cfg, idx);
    let logo_y = layout.logo_y + i64::from(motion.bob);

    let glitched_logo = channel_glitch(&assets.logo, motion.logo_glitch());
    let glitched_text = channel_glitch(&assets.text, motion.glitch);

    let mut frame = FrameBuilder::new(cfg.canvas, cfg.background)?;
    frame
        .paste(&assets.logo, layout.logo_x, logo_y)?
        .paste(&assets.shadow, layout.text_x, layout.text_y)?
        .paste(&glitched_logo, layout.logo_x, logo_y)?
        .paste(&glitched_text, layout.text_x, layout.text_y)?;
    if let Some(slice) = motion.slice {
        frame.slice_shift(slice)?;
    }
    frame.scanlines(cfg.scanline_spacing, cfg.scanline_opacity)?;
    Ok(frame)
}

/// Composite and quantize frame `idx`.
pub fn render_frame(
    cfg: &BannerConfig,
    assets: &BannerAssets,
    idx: FrameIndex,
) -> GlitchResult<IndexedFrame> {
    compose_frame(cfg, assets, idx)?.finish()
}

/// Render every frame of the animation, in display order.
pub fn render_frames(cfg: &BannerConfig, assets: &BannerAssets) -> GlitchResult<Vec<IndexedFrame>> {
    cfg.validate()?;
    (0..cfg.frame_count)
        .map(|i| render_frame(cfg, assets, FrameIndex(i)))
        .collect()
}

/// Stream every frame into `sink`, bracketed by `begin`/`end`. Returns the frame count.
pub fn render_into_sink(
    cfg: &BannerConfig,
    assets: &BannerAssets,
    sink: &mut dyn FrameSink,
) -> GlitchResult<u32> {
    cfg.validate()?;
    sink.begin(SinkConfig {
        canvas: cfg.canvas,
        frame_delay_ms: cfg.frame_delay_ms,
    })?;
    for i in 0..cfg.frame_count {
        let frame = render_frame(cfg, assets, FrameIndex(i))?;
        sink.push_frame(FrameIndex(i), &frame)?;
        tracing::debug!(frame = i, colors = frame.palette.len(), "frame encoded");
    }
    sink.end()?;
    Ok(cfg.frame_count)
}

/// Result of [`render_to_gif`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSummary {
    /// File that was written.
    pub out_path: PathBuf,
    /// Number of frames in the animation.
    pub frames: u32,
}

/// Prepare assets under `root` and write the looping GIF to `root/out_path`.
#[tracing::instrument(skip(cfg))]
pub fn render_to_gif(
    cfg: &BannerConfig,
    root: &Path,
    search: FontSearch,
) -> GlitchResult<RenderSummary> {
    let assets = prepare_assets(cfg, root, search)?;
    let out_path = root.join(&cfg.out_path);

    let mut sink = GifSink::new(GifSinkOpts::new(&out_path));
    let frames = render_into_sink(cfg, &assets, &mut sink)?;

    tracing::info!(path = %out_path.display(), frames, "gif written");
    Ok(RenderSummary { out_path, frames })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
