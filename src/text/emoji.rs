//! Curated emoji catalog and random selection.
//!
//! The catalog holds single-codepoint emojis only, with ambiguous categories
//! filtered out by name substring: skin-tone/gender variants, flags, clock
//! faces, colored shapes. Multi-codepoint sequences never enter the catalog,
//! which keeps random payloads unambiguous across devices.

use super::token_name;
use once_cell::sync::Lazy;
use rand::seq::index::sample;

/// Name substrings that disqualify an emoji from the catalog.
pub const EXCLUDED_NAME_PARTS: &[&str] = &[
    "ball", "black", "brown", "button", "clock", "cloud", "face", "flag", "globe", "green",
    "hand", "man", "medal", "men", "moon", "people", "person", "pointing", "speak", "thirty",
    "white", "woman", "women", "yellow",
];

struct CatalogEntry {
    name: String,
    glyph: &'static str,
}

static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(build_catalog);

fn build_catalog() -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = emojis::iter()
        .filter(|e| e.as_str().chars().count() == 1)
        .filter_map(|e| {
            let name = token_name(e.name());
            if EXCLUDED_NAME_PARTS.iter().any(|part| name.contains(part)) {
                return None;
            }
            Some(CatalogEntry {
                name,
                glyph: e.as_str(),
            })
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Number of emojis in the curated catalog.
pub fn catalog_size() -> usize {
    CATALOG.len()
}

/// Pick `count` distinct glyphs uniformly without replacement.
///
/// Negative counts are treated as their absolute value; counts larger than
/// the catalog clamp to the catalog size, so sampling always terminates.
pub fn random_emojis(count: i32) -> Vec<&'static str> {
    let wanted = count.unsigned_abs() as usize;
    let clamped = wanted.min(CATALOG.len());
    let mut rng = rand::thread_rng();
    sample(&mut rng, CATALOG.len(), clamped)
        .into_iter()
        .map(|i| CATALOG[i].glyph)
        .collect()
}
