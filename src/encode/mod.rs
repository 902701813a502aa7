//! Palette reduction and output sinks.

/// GIF89a sink.
pub mod gif;
/// Adaptive palette quantization.
pub mod quantize;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
