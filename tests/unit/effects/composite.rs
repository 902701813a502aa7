use super::*;

const C: Canvas = Canvas {
    width: 4,
    height: 3,
};

fn opaque_canvas(rgb: [u8; 3]) -> Vec<u8> {
    let mut buf = vec![0u8; C.rgba_len()];
    fill(&mut buf, C, Rgba8Premul::opaque(rgb)).unwrap();
    buf
}

fn px(buf: &[u8], x: u32, y: u32) -> [u8; 4] {
    let i = ((y * C.width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

#[test]
fn over_half_alpha_blends_with_dst() {
    let dst = [0, 0, 200, 255];
    let src = [100, 0, 0, 128];
    // dst scaled by (255 - 128) / 255 = 127 / 255, rounded.
    assert_eq!(over(dst, src), [100, 0, 100, 255]);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn paste_over_clips_negative_and_overflowing_positions() {
    let mut buf = opaque_canvas([0, 0, 0]);
    let layer = RgbaImage::from_pixel(3, 3, image::Rgba([255, 255, 255, 255]));
    paste_over(&mut buf, C, &layer, -2, 2).unwrap();

    // Only column 0 of row 2 is covered.
    assert_eq!(px(&buf, 0, 2), [255, 255, 255, 255]);
    assert_eq!(px(&buf, 1, 2), [0, 0, 0, 255]);
    assert_eq!(px(&buf, 0, 1), [0, 0, 0, 255]);

    // Fully outside is a no-op.
    let before = buf.clone();
    paste_over(&mut buf, C, &layer, 10, 0).unwrap();
    assert_eq!(buf, before);
}

#[test]
fn paste_over_blends_straight_alpha_layers() {
    let mut buf = opaque_canvas([0, 0, 0]);
    let layer = RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 128]));
    paste_over(&mut buf, C, &layer, 1, 1).unwrap();
    assert_eq!(px(&buf, 1, 1), [128, 0, 0, 255]);
}

#[test]
fn scanlines_cover_every_third_row_and_keep_opacity() {
    let mut buf = opaque_canvas([6, 7, 13]);
    scanlines_over(&mut buf, C, 3, [255, 255, 255], 26).unwrap();
    for x in 0..C.width {
        assert_eq!(px(&buf, x, 0), [31, 32, 38, 255]);
        assert_eq!(px(&buf, x, 1), [6, 7, 13, 255]);
        assert_eq!(px(&buf, x, 2), [6, 7, 13, 255]);
    }
    assert!(scanlines_over(&mut buf, C, 0, [255, 255, 255], 26).is_err());
}

#[test]
fn buffer_size_mismatch_is_rejected() {
    let mut short = vec![0u8; 8];
    assert!(fill(&mut short, C, Rgba8Premul::from_straight_rgba(0, 0, 0, 0)).is_err());
    let layer = RgbaImage::new(1, 1);
    assert!(paste_over(&mut short, C, &layer, 0, 0).is_err());
}
