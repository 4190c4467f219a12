//! System font lookup for text rasterization.
//!
//! Resolves a family/weight/style triple to a loaded font via the
//! system font database. Misses are cached too, so a document full of
//! unresolvable families does not re-scan on every frame.

use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex, OnceLock};

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// Lists available font family names, sorted, for UI pickers.
pub fn list_font_families() -> Vec<String> {
    let mut set = std::collections::HashSet::new();
    for face in db().faces() {
        for (name, _) in &face.families {
            set.insert(name.clone());
        }
    }
    let mut out: Vec<_> = set.into_iter().collect();
    out.sort();
    out
}

/// Resolves a font, falling back to the system sans-serif family when
/// the named family is unknown. `None` when no face loads at all.
pub fn font_for(family: &str, bold: bool, italic: bool) -> Option<Arc<Font<'static>>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<Arc<Font<'static>>>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        bold,
        italic,
    };
    if let Some(cached) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return cached.clone();
    }

    let loaded = load_font_from_system(family, bold, italic)
        .or_else(|| load_font_from_system("", bold, italic))
        .map(Arc::new);
    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, loaded.clone());
    loaded
}

fn load_font_from_system(family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other)],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}
