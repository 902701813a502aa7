use crate::config::BannerConfig;
use crate::foundation::core::{FrameIndex, Offset};
use crate::foundation::math::{cos_px, sin_px};

/// Horizontal band displacement applied on slice frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceShift {
    /// First row of the band.
    pub y0: u32,
    /// Band height in rows.
    pub height: u32,
    /// Horizontal displacement in pixels (positive moves right).
    pub shift: i32,
}

/// Every time-varying quantity of one frame. A pure function of the frame index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameMotion {
    /// Vertical logo displacement.
    pub bob: i32,
    /// Channel-glitch offset for the text; the logo uses `(-dx, dy)`.
    pub glitch: Offset,
    /// Present only on slice frames.
    pub slice: Option<SliceShift>,
}

impl FrameMotion {
    pub fn at(cfg: &BannerConfig, idx: FrameIndex) -> Self {
        let i = idx.as_f64();
        let bob = sin_px(i / 2.0, cfg.bob_amplitude);
        let glitch = Offset::new(
            sin_px(i * 0.8, cfg.glitch_amplitude_x),
            cos_px(i * 0.6, cfg.glitch_amplitude_y),
        );

        let slice = (idx.0 % cfg.slice_period == 0).then(|| {
            let span = u64::from(cfg.canvas.height - cfg.slice_height);
            SliceShift {
                y0: ((u64::from(idx.0) * u64::from(cfg.slice_stride)) % span) as u32,
                height: cfg.slice_height,
                shift: glitch.dx * cfg.slice_shift_factor,
            }
        });

        Self { bob, glitch, slice }
    }

    /// Channel-glitch offset for the logo: opposite horizontal phase, same vertical phase.
    pub fn logo_glitch(&self) -> Offset {
        Offset::new(-self.glitch.dx, self.glitch.dy)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/motion.rs"]
mod tests;
