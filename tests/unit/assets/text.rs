use super::*;

#[test]
fn builtin_text_is_ink_box_plus_symmetric_padding() {
    let img = render_text("ab", &ResolvedFont::Builtin, 14.0, [230, 236, 255], 6).unwrap();
    // "a" spans columns 0..=4 on rows 2..=6, "b" columns 6..=10 on rows 0..=6.
    assert_eq!(img.dimensions(), (11 + 12, 7 + 12));

    // Padding stays transparent.
    for x in 0..img.width() {
        assert_eq!(img.get_pixel(x, 0).0[3], 0);
        assert_eq!(img.get_pixel(x, img.height() - 1).0[3], 0);
    }
    // Top-left of "b"'s stem sits at the padded origin shifted by one cell.
    assert_eq!(img.get_pixel(6 + 6, 6).0, [230, 236, 255, 255]);
}

#[test]
fn whitespace_only_text_still_yields_a_raster() {
    let img = render_text("   ", &ResolvedFont::Builtin, 56.0, [255, 255, 255], 6).unwrap();
    assert_eq!(img.dimensions(), (13, 13));
    assert!(img.pixels().all(|p| p.0[3] == 0));
}

#[test]
fn ink_bounds_finds_outermost_opaque_pixels() {
    let mut img = RgbaImage::new(10, 8);
    assert_eq!(ink_bounds(&img), None);
    img.put_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
    img.put_pixel(6, 5, image::Rgba([5, 6, 7, 8]));
    assert_eq!(ink_bounds(&img), Some((3, 2, 6, 5)));
}

#[test]
fn short_glyphs_start_below_the_top_padding() {
    // "a", "c" and "e" have no ascender: their ink covers cell rows 2..=6.
    let img = render_text("ace", &ResolvedFont::Builtin, 14.0, [230, 236, 255], 6).unwrap();
    assert_eq!(img.dimensions(), (17 + 12, 5 + 12));
    let (_, y0, _, y1) = ink_bounds(&img).unwrap();
    assert_eq!(y0, 6 + 2);
    // The layout box is taller than the ink box, so the bottom padding is eaten.
    assert_eq!(y1, img.height() - 1 - 4);
    // Bottom-left pixel of "a" (cell row 5, column 0).
    assert_eq!(img.get_pixel(6, 6 + 5).0, [230, 236, 255, 255]);
}

#[test]
fn line_is_clipped_where_it_overflows_the_ink_sized_raster() {
    let line = Line {
        raster: RgbaImage::from_fn(4, 6, |_, y| {
            image::Rgba([9, 9, 9, if y >= 2 { 255 } else { 0 }])
        }),
        origin: (0, 0),
    };
    let out = place_at_origin(&line, 1);
    // Ink is 4x4; origin lands at (1, 1) so ink rows 2..=5 map to 3..=6 and row 6 is cut.
    assert_eq!(out.dimensions(), (6, 6));
    assert_eq!(out.get_pixel(1, 2).0[3], 0);
    assert_eq!(out.get_pixel(1, 3).0[3], 255);
    assert_eq!(out.get_pixel(1, 5).0[3], 255);
}

#[test]
fn xml_escape_handles_markup_characters() {
    assert_eq!(xml_escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    assert_eq!(xml_escape("deepkrak3n"), "deepkrak3n");
}

#[test]
fn system_font_or_fallback_always_renders_ink() {
    let font = crate::assets::font::resolve_font(
        &crate::config::FontSpec::default(),
        std::path::Path::new("target"),
        crate::assets::font::FontSearch::default(),
    );
    let img = render_text("deepkrak3n", &font, 56.0, [230, 236, 255], 6).unwrap();
    assert!(img.width() > 12 && img.height() > 12);
    assert!(img.pixels().any(|p| p.0[3] > 0));
}

#[test]
fn outline_text_keeps_ascender_gap_above_ink() {
    let font = crate::assets::font::resolve_font(
        &crate::config::FontSpec::default(),
        std::path::Path::new("target"),
        crate::assets::font::FontSearch::default(),
    );
    let ResolvedFont::Outline { db, .. } = &font else {
        return;
    };
    let ascent = ascent_px(db, 56.0).unwrap();
    assert!(ascent > 0.0 && ascent <= 56.0 * 1.2);

    let img = render_text("deepkrak3n", &font, 56.0, [230, 236, 255], 6).unwrap();
    let (_, y0, _, _) = ink_bounds(&img).unwrap();
    // Tallest glyphs ("d", "k") stop short of the ascender line.
    assert!(y0 > 6, "first ink row {y0}");
}
