use crate::encode::quantize::IndexedFrame;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::GlitchResult;

/// Configuration provided to a [`FrameSink`] before any frame is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Size every pushed frame must have.
    pub canvas: Canvas,
    /// Display duration of each frame.
    pub frame_delay_ms: u32,
}

/// Sink contract for consuming finished frames in display order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> GlitchResult<()>;
    /// Push one frame in strictly increasing display order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &IndexedFrame) -> GlitchResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> GlitchResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    pub(crate) frames: Vec<(FrameIndex, IndexedFrame)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, IndexedFrame)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> GlitchResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &IndexedFrame) -> GlitchResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> GlitchResult<()> {
        self.ended = true;
        Ok(())
    }
}
