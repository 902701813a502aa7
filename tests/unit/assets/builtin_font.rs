use super::*;

#[test]
fn glyph_lookup_covers_printable_ascii() {
    assert_eq!(glyph(' '), [0; 7]);
    assert_eq!(glyph('I'), [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]);
    assert_eq!(glyph('~'), GLYPHS[94]);
    assert_eq!(glyph('\u{e9}'), TOFU);
    assert_eq!(glyph('\n'), TOFU);
}

#[test]
fn scale_tracks_font_size() {
    assert_eq!(scale_for_size(56.0), 4);
    assert_eq!(scale_for_size(14.0), 1);
    assert_eq!(scale_for_size(1.0), 1);
}

#[test]
fn draw_line_sizes_cells_without_trailing_gap() {
    let img = draw_line("ab", 2, [255, 255, 255]);
    // 2 chars: 5 + 1 + 5 columns, 7 rows, each scaled by 2.
    assert_eq!(img.dimensions(), (22, 14));
}

#[test]
fn draw_line_sets_only_glyph_pixels() {
    let img = draw_line("|", 1, [10, 20, 30]);
    assert_eq!(img.dimensions(), (5, 7));
    for y in 0..7 {
        assert_eq!(img.get_pixel(2, y).0, [10, 20, 30, 255]);
        assert_eq!(img.get_pixel(0, y).0[3], 0);
        assert_eq!(img.get_pixel(4, y).0[3], 0);
    }
}
