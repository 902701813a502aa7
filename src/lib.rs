//! glitchgif renders a short, looping, glitch-styled GIF banner from a logo and a text label.
//!
//! The pipeline is deterministic and single-threaded:
//!
//! - Load a [`BannerConfig`] (defaults reproduce the canonical banner)
//! - [`prepare_assets`] once: fitted logo, rendered label, drop shadow
//! - [`render_frame`] per index, or [`render_to_gif`] for the whole animation through a
//!   [`FrameSink`]
#![forbid(unsafe_code)]

mod assets;
mod effects;
mod foundation;

/// Banner configuration and its JSON loader.
pub mod config;
/// Palette quantization and frame sinks.
pub mod encode;
/// Frame synthesis.
pub mod render;

pub use crate::config::{BannerConfig, FontSpec};
pub use crate::foundation::core::{Canvas, FrameIndex, Offset, Rgba8Premul};
pub use crate::foundation::error::{GlitchError, GlitchResult};

pub use crate::assets::decode::{decode_image, fit_width, load_logo};
pub use crate::assets::font::{FontSearch, ResolvedFont, resolve_font};
pub use crate::assets::text::render_text;
pub use crate::effects::glitch::{channel_glitch, multiply_flat, offset_wrapped};
pub use crate::encode::gif::{GifSink, GifSinkOpts, ensure_parent_dir};
pub use crate::encode::quantize::{IndexedFrame, TRANSPARENT_INDEX, quantize_adaptive};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::frame::{FrameBuilder, FrameRGBA};
pub use crate::render::motion::{FrameMotion, SliceShift};
pub use crate::render::pipeline::{
    BannerAssets, Layout, RenderSummary, compose_frame, prepare_assets, render_frame,
    render_frames, render_into_sink, render_to_gif,
};
