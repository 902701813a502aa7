//! Frame synthesis: per-frame motion, layered compositing and the end-to-end pipeline.

/// Canvas builder and raw frame buffers.
pub mod frame;
/// Time-varying offsets as pure functions of the frame index.
pub mod motion;
/// Asset preparation, frame rendering and GIF output.
pub mod pipeline;
