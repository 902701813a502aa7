//! Adaptive palette reduction (median cut) for GIF frames.
//!
//! Palette index 0 is reserved for transparency. Pixels with alpha below
//! [`ALPHA_THRESHOLD`] map to it; every other pixel maps to the nearest of up to
//! [`MAX_ADAPTIVE_COLORS`] colors chosen from the frame's own histogram.

use std::collections::HashMap;

use crate::foundation::error::{GlitchError, GlitchResult};
use crate::render::frame::FrameRGBA;

/// Palette index reserved for transparent pixels.
pub const TRANSPARENT_INDEX: u8 = 0;
/// Colors available to the adaptive palette (256 minus the transparent slot).
pub const MAX_ADAPTIVE_COLORS: usize = 255;
/// Pixels with alpha below this value become transparent.
pub const ALPHA_THRESHOLD: u8 = 128;

/// One palette-indexed frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    /// Palette entries; `palette[TRANSPARENT_INDEX]` is the transparent slot.
    pub palette: Vec<[u8; 3]>,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
}

impl IndexedFrame {
    /// Palette flattened to `r, g, b, r, g, b, ..` as GIF color tables expect.
    pub fn palette_bytes(&self) -> Vec<u8> {
        self.palette.iter().flatten().copied().collect()
    }

    /// Color of the pixel at `(x, y)`, `None` for transparent pixels.
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let idx = self.indices[(y as usize) * (self.width as usize) + (x as usize)];
        if idx == TRANSPARENT_INDEX {
            return None;
        }
        Some(self.palette[usize::from(idx)])
    }
}

/// Quantize a frame to at most 256 palette entries with transparent index 0.
///
/// `transparent_rgb` is the color stored in the transparent slot (viewers that ignore
/// transparency show it).
pub fn quantize_adaptive(
    frame: &FrameRGBA,
    transparent_rgb: [u8; 3],
) -> GlitchResult<IndexedFrame> {
    quantize_with_limit(frame, MAX_ADAPTIVE_COLORS, transparent_rgb)
}

pub(crate) fn quantize_with_limit(
    frame: &FrameRGBA,
    max_colors: usize,
    transparent_rgb: [u8; 3],
) -> GlitchResult<IndexedFrame> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected || expected == 0 {
        return Err(GlitchError::encode(
            "quantize expects a non-empty buffer matching width*height*4",
        ));
    }
    let max_colors = max_colors.clamp(1, MAX_ADAPTIVE_COLORS);

    let keys: Vec<Option<u32>> = frame
        .data
        .chunks_exact(4)
        .map(|px| opaque_key(px, frame.premultiplied))
        .collect();

    let histogram = histogram(&keys);
    let colors: Vec<[u8; 3]> = if histogram.len() <= max_colors {
        histogram.iter().map(|&(key, _)| unpack(key)).collect()
    } else {
        median_cut(histogram.clone(), max_colors)
    };

    let lookup: HashMap<u32, u8> = histogram
        .iter()
        .map(|&(key, _)| (key, nearest(&colors, unpack(key)) + 1))
        .collect();

    let indices = keys
        .iter()
        .map(|k| match k {
            Some(key) => lookup[key],
            None => TRANSPARENT_INDEX,
        })
        .collect();

    let mut palette = Vec::with_capacity(colors.len() + 1);
    palette.push(transparent_rgb);
    palette.extend(colors);

    Ok(IndexedFrame {
        width: frame.width,
        height: frame.height,
        palette,
        indices,
    })
}

fn opaque_key(px: &[u8], premultiplied: bool) -> Option<u32> {
    let a = px[3];
    if a < ALPHA_THRESHOLD {
        return None;
    }
    let (r, g, b) = if premultiplied && a < 255 {
        (unpremul(px[0], a), unpremul(px[1], a), unpremul(px[2], a))
    } else {
        (px[0], px[1], px[2])
    };
    Some(pack([r, g, b]))
}

fn unpremul(c: u8, a: u8) -> u8 {
    ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8
}

fn pack(rgb: [u8; 3]) -> u32 {
    (u32::from(rgb[0]) << 16) | (u32::from(rgb[1]) << 8) | u32::from(rgb[2])
}

fn unpack(key: u32) -> [u8; 3] {
    [(key >> 16) as u8, (key >> 8) as u8, key as u8]
}

/// Unique opaque colors with pixel counts, sorted by packed color.
fn histogram(keys: &[Option<u32>]) -> Vec<(u32, u32)> {
    let mut counts: HashMap<u32, u32> = HashMap::new();
    for key in keys.iter().flatten() {
        *counts.entry(*key).or_insert(0) += 1;
    }
    let mut out: Vec<(u32, u32)> = counts.into_iter().collect();
    out.sort_unstable_by_key(|&(key, _)| key);
    out
}

struct ColorBox {
    colors: Vec<(u32, u32)>,
    min: [u8; 3],
    max: [u8; 3],
}

impl ColorBox {
    fn new(colors: Vec<(u32, u32)>) -> Self {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        for &(key, _) in &colors {
            let c = unpack(key);
            for ch in 0..3 {
                min[ch] = min[ch].min(c[ch]);
                max[ch] = max[ch].max(c[ch]);
            }
        }
        Self { colors, min, max }
    }

    fn widest_channel(&self) -> (usize, u8) {
        (0..3)
            .map(|ch| (ch, self.max[ch] - self.min[ch]))
            .fold((0, 0), |best, cur| if cur.1 > best.1 { cur } else { best })
    }

    fn population(&self) -> u64 {
        self.colors.iter().map(|&(_, n)| u64::from(n)).sum()
    }

    fn mean(&self) -> [u8; 3] {
        let total = self.population().max(1);
        let mut sum = [0u64; 3];
        for &(key, n) in &self.colors {
            let c = unpack(key);
            for ch in 0..3 {
                sum[ch] += u64::from(c[ch]) * u64::from(n);
            }
        }
        sum.map(|s| ((s + total / 2) / total) as u8)
    }

    /// Split at the population median along the widest channel.
    fn split(mut self) -> (Self, Self) {
        let (ch, _) = self.widest_channel();
        self.colors.sort_unstable_by_key(|&(key, _)| (unpack(key)[ch], key));

        let half = self.population().div_ceil(2);
        let mut acc = 0u64;
        let mut at = self.colors.len() - 1;
        for (i, &(_, n)) in self.colors.iter().enumerate() {
            acc += u64::from(n);
            if acc >= half {
                at = i + 1;
                break;
            }
        }
        let at = at.clamp(1, self.colors.len() - 1);

        let upper = self.colors.split_off(at);
        (Self::new(self.colors), Self::new(upper))
    }
}

fn median_cut(histogram: Vec<(u32, u32)>, max_colors: usize) -> Vec<[u8; 3]> {
    let mut boxes = vec![ColorBox::new(histogram)];
    while boxes.len() < max_colors {
        let pick = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() > 1)
            .max_by(|(ia, a), (ib, b)| {
                let ka = (a.widest_channel().1, a.population());
                let kb = (b.widest_channel().1, b.population());
                // Prefer the earlier box on ties.
                ka.cmp(&kb).then(ib.cmp(ia))
            })
            .map(|(i, _)| i);
        let Some(i) = pick else {
            break;
        };
        let (lo, hi) = boxes.swap_remove(i).split();
        boxes.push(lo);
        boxes.push(hi);
    }
    boxes.iter().map(ColorBox::mean).collect()
}

/// Index of the closest palette color (squared RGB distance, lowest index on ties).
fn nearest(palette: &[[u8; 3]], c: [u8; 3]) -> u8 {
    let mut best = 0usize;
    let mut best_d = u32::MAX;
    for (i, p) in palette.iter().enumerate() {
        let d: u32 = (0..3)
            .map(|ch| {
                let diff = i32::from(p[ch]) - i32::from(c[ch]);
                (diff * diff) as u32
            })
            .sum();
        if d < best_d {
            best = i;
            best_d = d;
            if d == 0 {
                break;
            }
        }
    }
    best as u8
}

#[cfg(test)]
#[path = "../../tests/unit/encode/quantize.rs"]
mod tests;
