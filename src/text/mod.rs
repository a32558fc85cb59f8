//! Message-body text processing: sanitization, the curated emoji catalog,
//! and random payload composition.

mod compose;
mod emoji;
mod sanitize;

pub use compose::compose_random_message;
pub use emoji::{catalog_size, random_emojis, EXCLUDED_NAME_PARTS};
pub use sanitize::sanitize;

/// Normalize a registry emoji name into a token: lowercase, word separators
/// mapped to underscores, punctuation dropped.
///
/// example: "thumbs up" -> "thumbs_up"
pub(crate) fn token_name(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        match c {
            ' ' | '-' | ':' => {
                if !token.ends_with('_') {
                    token.push('_');
                }
            }
            '\u{2019}' | '.' | ',' | '!' | '“' | '”' | '"' => {}
            other => token.push(other),
        }
    }
    token.trim_matches('_').to_string()
}
