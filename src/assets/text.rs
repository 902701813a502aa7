use image::RgbaImage;

use crate::assets::builtin_font;
use crate::assets::font::ResolvedFont;
use crate::foundation::error::{GlitchError, GlitchResult};

/// A rendered line before padding: the raster plus where its layout origin (left edge of the
/// pen, on the ascender line) sits inside it.
struct Line {
    raster: RgbaImage,
    origin: (i64, i64),
}

/// Render a single line of text into a transparent, straight-alpha raster.
///
/// The raster is the text's ink bounding box grown by `padding` on every side. The layout
/// origin (left pen position on the ascender line) is drawn at `(padding, padding)`, so ink
/// starts `ascent - glyph_top` rows below the top padding and anything past the raster edge
/// is clipped. If the outline face cannot produce any ink the built-in bitmap font is used
/// instead.
#[tracing::instrument(skip(font))]
pub fn render_text(
    text: &str,
    font: &ResolvedFont,
    size: f32,
    color: [u8; 3],
    padding: u32,
) -> GlitchResult<RgbaImage> {
    let line = match font {
        ResolvedFont::Outline {
            db, family, weight, ..
        } => match render_outline(text, db, family, *weight, size, color) {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "outline text failed, using built-in bitmap font");
                render_builtin(text, size, color)
            }
        },
        ResolvedFont::Builtin => render_builtin(text, size, color),
    };
    Ok(place_at_origin(&line, padding))
}

fn render_builtin(text: &str, size: f32, color: [u8; 3]) -> Line {
    Line {
        raster: builtin_font::draw_line(text, builtin_font::scale_for_size(size), color),
        origin: (0, 0),
    }
}

/// Ascender height in whole pixels, rounded up like hinted font size metrics.
fn ascent_px(db: &usvg::fontdb::Database, size: f32) -> GlitchResult<f32> {
    let face = db
        .faces()
        .next()
        .ok_or_else(|| GlitchError::asset("font database holds no face"))?;
    let metrics = db
        .with_face_data(face.id, |data, index| {
            ttf_parser::Face::parse(data, index)
                .ok()
                .map(|f| (f.ascender(), f.units_per_em()))
        })
        .flatten()
        .ok_or_else(|| GlitchError::asset("font metrics unreadable"))?;
    let (ascender, units_per_em) = metrics;
    if units_per_em == 0 {
        return Err(GlitchError::asset("font reports zero units per em"));
    }
    Ok((f32::from(ascender) * size / f32::from(units_per_em)).ceil())
}

fn render_outline(
    text: &str,
    db: &std::sync::Arc<usvg::fontdb::Database>,
    family: &str,
    weight: u16,
    size: f32,
    color: [u8; 3],
) -> GlitchResult<Line> {
    let ascent = ascent_px(db, size)?;
    let baseline = (size * 2.0).ceil();
    let chars = text.chars().count().max(1) as f32;
    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
            r#"<text x="0" y="{baseline}" font-family="'{family}'" font-weight="{weight}" "#,
            r##"font-size="{size}" fill="#{r:02x}{g:02x}{b:02x}">{text}</text></svg>"##
        ),
        w = (size * (chars + 2.0)).ceil(),
        h = (size * 3.0).ceil(),
        baseline = baseline,
        family = xml_escape(family),
        weight = weight,
        size = size,
        r = color[0],
        g = color[1],
        b = color[2],
        text = xml_escape(text),
    );

    let opts = usvg::Options {
        fontdb: db.clone(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts)
        .map_err(|e| GlitchError::asset(format!("parse text svg: {e}")))?;
    if !tree.root().has_children() {
        return Err(GlitchError::asset("text produced no glyph outlines"));
    }

    let bbox = tree.root().abs_bounding_box();
    let left = bbox.left().floor();
    let top = bbox.top().floor();
    let width = (bbox.right().ceil() - left) as u32;
    let height = (bbox.bottom().ceil() - top) as u32;
    if width == 0 || height == 0 {
        return Err(GlitchError::asset("text has an empty ink box"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| GlitchError::asset("failed to allocate text pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_translate(-left, -top);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut raster = RgbaImage::new(width, height);
    for (dst, src) in raster.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
    Ok(Line {
        raster,
        origin: (-left as i64, (baseline - ascent - top) as i64),
    })
}

/// Inclusive `(x0, y0, x1, y1)` of every pixel with non-zero alpha.
pub(crate) fn ink_bounds(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = img.dimensions();
    let mut min_x = w;
    let mut min_y = h;
    let mut max_x = 0;
    let mut max_y = 0;
    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] == 0 {
            continue;
        }
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    (min_x <= max_x && min_y <= max_y).then_some((min_x, min_y, max_x, max_y))
}

/// Size the output to the ink box plus `padding` and draw the line with its layout origin at
/// `(padding, padding)`.
fn place_at_origin(line: &Line, padding: u32) -> RgbaImage {
    let (ink_w, ink_h) = match ink_bounds(&line.raster) {
        Some((x0, y0, x1, y1)) => (x1 - x0 + 1, y1 - y0 + 1),
        None => (1, 1),
    };
    let mut out = RgbaImage::new(ink_w + padding * 2, ink_h + padding * 2);
    let (ox, oy) = line.origin;
    image::imageops::replace(
        &mut out,
        &line.raster,
        i64::from(padding) - ox,
        i64::from(padding) - oy,
    );
    out
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
