use super::*;

/// 4x3 image where each pixel encodes its coordinates: r = x, g = y, b = 10 * x + y, a = 255.
fn coord_image() -> RgbaImage {
    RgbaImage::from_fn(4, 3, |x, y| {
        image::Rgba([x as u8, y as u8, (10 * x + y) as u8, 255])
    })
}

#[test]
fn offset_wrapped_moves_content_and_wraps() {
    let img = coord_image();
    let out = offset_wrapped(&img, Offset::new(1, 2));
    // Destination (1, 2) holds what was at (0, 0).
    assert_eq!(out.get_pixel(1, 2).0, img.get_pixel(0, 0).0);
    // Destination (0, 0) holds what wrapped in from (3, 1).
    assert_eq!(out.get_pixel(0, 0).0, img.get_pixel(3, 1).0);
    assert_eq!(offset_wrapped(&img, Offset::new(4, 3)), img);
}

#[test]
fn channel_glitch_zero_offset_is_identity() {
    let img = coord_image();
    assert_eq!(channel_glitch(&img, Offset::default()), img);
}

#[test]
fn channel_glitch_shifts_red_forward_and_blue_backward() {
    let img = coord_image();
    let out = channel_glitch(&img, Offset::new(1, 0));
    for y in 0..3 {
        for x in 0..4u32 {
            let px = out.get_pixel(x, y).0;
            // Red comes from one column to the left, blue from one column to the right.
            assert_eq!(u32::from(px[0]), (x + 3) % 4);
            assert_eq!(u32::from(px[2]), 10 * ((x + 1) % 4) + y);
            // Green and alpha untouched.
            assert_eq!(u32::from(px[1]), y);
            assert_eq!(px[3], 255);
        }
    }
}

#[test]
fn channel_glitch_vertical_offset_matches_frame_zero_signature() {
    // Frame 0 of the canonical banner glitches the text with (dx, dy) = (0, 2).
    let img = coord_image();
    let out = channel_glitch(&img, Offset::new(0, 2));
    let red = RgbaImage::from_fn(4, 3, |x, y| {
        image::Rgba([out.get_pixel(x, y).0[0], 0, 0, 0])
    });
    let blue = RgbaImage::from_fn(4, 3, |x, y| {
        image::Rgba([0, 0, out.get_pixel(x, y).0[2], 0])
    });
    let red_expected = offset_wrapped(&img, Offset::new(0, 2));
    let blue_expected = offset_wrapped(&img, Offset::new(0, -2));
    for (x, y, px) in red.enumerate_pixels() {
        assert_eq!(px.0[0], red_expected.get_pixel(x, y).0[0]);
    }
    for (x, y, px) in blue.enumerate_pixels() {
        assert_eq!(px.0[2], blue_expected.get_pixel(x, y).0[2]);
    }
}

#[test]
fn multiply_flat_darkens_every_channel() {
    let img = RgbaImage::from_pixel(1, 1, image::Rgba([255, 128, 0, 255]));
    let out = multiply_flat(&img, [20, 24, 36, 130]);
    assert_eq!(out.get_pixel(0, 0).0, [20, 12, 0, 130]);
}

#[test]
fn multiply_flat_truncates_fractional_levels() {
    // 200 * 130 / 255 = 101.96 and 230 * 20 / 255 = 18.04, both rounded down.
    let img = RgbaImage::from_pixel(1, 1, image::Rgba([230, 236, 255, 200]));
    let out = multiply_flat(&img, [20, 24, 36, 130]);
    assert_eq!(out.get_pixel(0, 0).0, [18, 22, 36, 101]);
}

#[test]
fn slice_shift_rotates_only_the_band() {
    let canvas = Canvas {
        width: 4,
        height: 3,
    };
    let img = coord_image();
    let mut data = img.clone().into_raw();
    slice_shift_in_place(&mut data, canvas, 1, 1, -1).unwrap();
    let out = RgbaImage::from_raw(4, 3, data).unwrap();

    for x in 0..4 {
        assert_eq!(out.get_pixel(x, 0), img.get_pixel(x, 0));
        assert_eq!(out.get_pixel(x, 2), img.get_pixel(x, 2));
        assert_eq!(out.get_pixel(x, 1), img.get_pixel((x + 1) % 4, 1));
    }
}

#[test]
fn slice_shift_matches_offset_wrapped_on_band() {
    let canvas = Canvas {
        width: 4,
        height: 3,
    };
    let img = coord_image();
    let mut data = img.clone().into_raw();
    slice_shift_in_place(&mut data, canvas, 0, 3, 6).unwrap();
    let out = RgbaImage::from_raw(4, 3, data).unwrap();
    assert_eq!(out, offset_wrapped(&img, Offset::new(6, 0)));
}

#[test]
fn slice_shift_clips_band_at_bottom_and_checks_buffer() {
    let canvas = Canvas {
        width: 4,
        height: 3,
    };
    let mut data = coord_image().into_raw();
    slice_shift_in_place(&mut data, canvas, 2, 12, 1).unwrap();
    assert!(slice_shift_in_place(&mut data[..8], canvas, 0, 1, 1).is_err());
}
