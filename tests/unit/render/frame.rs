use super::*;

const BG: [u8; 3] = [6, 7, 13];

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn red_dot() -> RgbaImage {
    RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255]))
}

#[test]
fn new_canvas_is_opaque_background() {
    let b = FrameBuilder::new(Canvas::new(3, 2).unwrap(), BG).unwrap();
    let frame = b.into_rgba();
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 3 * 2 * 4);
    for p in frame.data.chunks_exact(4) {
        assert_eq!(p, &[6, 7, 13, 255]);
    }
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let canvas = Canvas {
        width: 0,
        height: 4,
    };
    assert!(FrameBuilder::new(canvas, BG).is_err());
}

#[test]
fn paste_places_layer_and_clips_outside() {
    let mut b = FrameBuilder::new(Canvas::new(3, 2).unwrap(), BG).unwrap();
    b.paste(&red_dot(), 1, 0)
        .unwrap()
        .paste(&red_dot(), -5, -5)
        .unwrap()
        .paste(&red_dot(), 3, 0)
        .unwrap();
    let frame = b.into_rgba();
    assert_eq!(px(&frame, 1, 0), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 0, 0), [6, 7, 13, 255]);
    assert_eq!(px(&frame, 2, 1), [6, 7, 13, 255]);
}

#[test]
fn slice_shift_wraps_band_only() {
    let mut b = FrameBuilder::new(Canvas::new(3, 2).unwrap(), BG).unwrap();
    b.paste(&red_dot(), 2, 0).unwrap().paste(&red_dot(), 2, 1).unwrap();
    b.slice_shift(SliceShift {
        y0: 0,
        height: 1,
        shift: 1,
    })
    .unwrap();
    let frame = b.into_rgba();
    assert_eq!(px(&frame, 0, 0), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 2, 0), [6, 7, 13, 255]);
    assert_eq!(px(&frame, 2, 1), [255, 0, 0, 255]);
}

#[test]
fn scanlines_brighten_every_spacing_row() {
    let mut b = FrameBuilder::new(Canvas::new(2, 4).unwrap(), BG).unwrap();
    b.scanlines(2, 26).unwrap();
    let frame = b.into_rgba();
    for y in 0..4 {
        let p = px(&frame, 0, y);
        if y % 2 == 0 {
            assert!(p[0] > BG[0] && p[1] > BG[1] && p[2] > BG[2], "row {y}: {p:?}");
            assert_eq!(p[3], 255);
        } else {
            assert_eq!(p, [6, 7, 13, 255]);
        }
    }
}

#[test]
fn finish_yields_indexed_frame_with_background_slot() {
    let mut b = FrameBuilder::new(Canvas::new(3, 2).unwrap(), BG).unwrap();
    b.paste(&red_dot(), 0, 0).unwrap();
    let q = b.finish().unwrap();
    assert_eq!((q.width, q.height), (3, 2));
    assert_eq!(q.indices.len(), 6);
    assert_eq!(q.palette[0], BG);
    assert_eq!(q.rgb_at(0, 0), Some([255, 0, 0]));
    assert_eq!(q.rgb_at(1, 1), Some(BG));
}
