use std::path::{Path, PathBuf};
use std::sync::Arc;

use usvg::fontdb;

use crate::config::FontSpec;

/// Font chosen for the text label.
#[derive(Clone)]
pub enum ResolvedFont {
    /// An outline face, held alone in its own font database so text layout cannot pick any
    /// other face.
    Outline {
        db: Arc<fontdb::Database>,
        family: String,
        weight: u16,
        /// Where the face came from (file path or system font id), for diagnostics.
        origin: String,
    },
    /// The built-in 5x7 bitmap font.
    Builtin,
}

impl ResolvedFont {
    /// `true` when the built-in bitmap font is in use.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline {
                family,
                weight,
                origin,
                ..
            } => f
                .debug_struct("Outline")
                .field("family", family)
                .field("weight", weight)
                .field("origin", origin)
                .finish(),
            Self::Builtin => f.write_str("Builtin"),
        }
    }
}

/// Where [`resolve_font`] may look for the requested face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSearch {
    /// Also query installed system fonts when no local file matches.
    pub system_fonts: bool,
}

impl Default for FontSearch {
    fn default() -> Self {
        Self { system_fonts: true }
    }
}

/// Resolve the requested face, falling back to the built-in bitmap font.
///
/// Lookup order: `<root>/<file>`, `<root>/fonts/<file>`, then (if enabled) an installed system
/// face of `spec.family` at the nearest available weight. Missing or unparsable fonts are not
/// errors.
pub fn resolve_font(spec: &FontSpec, root: &Path, search: FontSearch) -> ResolvedFont {
    for path in local_candidates(spec, root) {
        if let Some(font) = load_font_file(&path) {
            tracing::debug!(?font, "resolved font from file");
            return font;
        }
    }

    if search.system_fonts
        && let Some(font) = query_system_font(spec)
    {
        tracing::debug!(?font, "resolved system font");
        return font;
    }

    tracing::debug!(
        file = %spec.file,
        family = %spec.family,
        "font unavailable, using built-in bitmap font"
    );
    ResolvedFont::Builtin
}

fn local_candidates(spec: &FontSpec, root: &Path) -> Vec<PathBuf> {
    if spec.file.is_empty() {
        return Vec::new();
    }
    vec![root.join(&spec.file), root.join("fonts").join(&spec.file)]
}

fn load_font_file(path: &Path) -> Option<ResolvedFont> {
    if !path.is_file() {
        return None;
    }
    let mut db = fontdb::Database::new();
    if let Err(e) = db.load_font_file(path) {
        tracing::debug!(path = %path.display(), error = %e, "font file unreadable");
        return None;
    }
    let face = db.faces().next()?;
    let family = face.families.first()?.0.clone();
    let weight = face.weight.0;

    Some(ResolvedFont::Outline {
        db: Arc::new(db),
        family,
        weight,
        origin: path.display().to_string(),
    })
}

fn query_system_font(spec: &FontSpec) -> Option<ResolvedFont> {
    let mut system = fontdb::Database::new();
    system.load_system_fonts();

    let families = [fontdb::Family::Name(&spec.family)];
    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight(spec.weight),
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = system.query(&query)?;
    let face = system.face(id)?;
    let family = face.families.first()?.0.clone();
    let weight = face.weight.0;
    let origin = face.post_script_name.clone();

    // Copy the chosen face into a private database so layout is pinned to it.
    let (data, index) = system.with_face_data(id, |data, index| (data.to_vec(), index))?;
    let mut db = fontdb::Database::new();
    db.load_font_data(data);
    if db.len() > 1 {
        // Collections load every face; keep only the one the query picked.
        let keep: Vec<fontdb::ID> = db
            .faces()
            .filter(|f| f.index != index)
            .map(|f| f.id)
            .collect();
        for id in keep {
            db.remove_face(id);
        }
    }
    if db.is_empty() {
        return None;
    }

    Some(ResolvedFont::Outline {
        db: Arc::new(db),
        family,
        weight,
        origin,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
