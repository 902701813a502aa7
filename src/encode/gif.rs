use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::quantize::{IndexedFrame, TRANSPARENT_INDEX};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{GlitchError, GlitchResult};

/// Options for [`GifSink`] output.
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF file path. An existing file is overwritten.
    pub out_path: PathBuf,
}

impl GifSinkOpts {
    /// Create options for writing a GIF to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
        }
    }
}

/// Sink that writes a looping GIF89a.
///
/// Every frame carries its own palette, the configured delay, transparent index 0, and
/// "restore to background" disposal. The animation repeats forever.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<gif::Encoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    delay_cs: u16,
    last_idx: Option<FrameIndex>,
    frames_written: u32,
}

impl GifSink {
    /// Create a new sink; nothing is written until `begin`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            delay_cs: 0,
            last_idx: None,
            frames_written: 0,
        }
    }
}

impl std::fmt::Debug for GifSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifSink")
            .field("opts", &self.opts)
            .field("cfg", &self.cfg)
            .field("frames_written", &self.frames_written)
            .finish_non_exhaustive()
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> GlitchResult<()> {
        cfg.canvas.validate()?;
        self.delay_cs = delay_centiseconds(cfg.frame_delay_ms)?;

        ensure_parent_dir(&self.opts.out_path)?;
        let file = File::create(&self.opts.out_path)
            .with_context(|| format!("create gif '{}'", self.opts.out_path.display()))?;

        let mut encoder = gif::Encoder::new(
            BufWriter::new(file),
            cfg.canvas.width as u16,
            cfg.canvas.height as u16,
            &[],
        )
        .map_err(|e| GlitchError::encode(format!("write gif header: {e}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| GlitchError::encode(format!("write gif loop extension: {e}")))?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &IndexedFrame) -> GlitchResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| GlitchError::encode("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(GlitchError::encode(
                "gif sink received out-of-order frame index",
            ));
        }

        if frame.width != cfg.canvas.width || frame.height != cfg.canvas.height {
            return Err(GlitchError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.canvas.width, cfg.canvas.height
            )));
        }
        if frame.indices.len() != (frame.width as usize) * (frame.height as usize) {
            return Err(GlitchError::validation(
                "frame.indices size mismatch with width*height",
            ));
        }
        if frame.palette.is_empty() || frame.palette.len() > 256 {
            return Err(GlitchError::validation(
                "frame palette must hold between 1 and 256 colors",
            ));
        }

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(GlitchError::encode("gif sink is already finalized"));
        };

        let mut gif_frame = gif::Frame::default();
        gif_frame.width = frame.width as u16;
        gif_frame.height = frame.height as u16;
        gif_frame.delay = self.delay_cs;
        gif_frame.dispose = gif::DisposalMethod::Background;
        gif_frame.transparent = Some(TRANSPARENT_INDEX);
        gif_frame.palette = Some(frame.palette_bytes());
        gif_frame.buffer = Cow::Borrowed(frame.indices.as_slice());
        encoder
            .write_frame(&gif_frame)
            .map_err(|e| GlitchError::encode(format!("write gif frame {}: {e}", idx.0)))?;

        self.last_idx = Some(idx);
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> GlitchResult<()> {
        let Some(encoder) = self.encoder.take() else {
            return Err(GlitchError::encode("gif sink not started"));
        };
        if self.frames_written == 0 {
            return Err(GlitchError::validation(
                "an animation needs at least one frame",
            ));
        }

        let mut writer = encoder
            .into_inner()
            .with_context(|| format!("write gif trailer '{}'", self.opts.out_path.display()))?;
        writer
            .flush()
            .with_context(|| format!("flush gif '{}'", self.opts.out_path.display()))?;
        tracing::debug!(
            path = %self.opts.out_path.display(),
            frames = self.frames_written,
            "gif finalized"
        );
        Ok(())
    }
}

/// GIF delays are stored in hundredths of a second, rounded half up.
pub(crate) fn delay_centiseconds(ms: u32) -> GlitchResult<u16> {
    u16::try_from(ms.saturating_add(5) / 10)
        .map_err(|_| GlitchError::validation(format!("frame delay {ms}ms is too long for gif")))
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> GlitchResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
