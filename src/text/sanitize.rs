//! SMS body sanitization.
//!
//! Raw provider text is converted into a stable, printable form before it is
//! stored anywhere: emoji graphemes become `{delimited_name}` tokens and
//! whitespace is normalized.

use super::token_name;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("static pattern"));

/// Sanitize SMS message body text.
///
/// Steps, in order:
/// 1. replace every unicode emoji grapheme with a delimited readable name,
///    example: 👍 -> `{thumbs_up}`; multi-codepoint sequences map to one token
/// 2. replace tab and newline characters with single spaces
/// 3. collapse consecutive spaces into one
/// 4. trim leading/trailing whitespace
///
/// The result is deterministic and idempotent: sanitizing an already
/// sanitized string returns it unchanged.
pub fn sanitize(raw: &str) -> String {
    let mut demojized = String::with_capacity(raw.len());
    for grapheme in raw.graphemes(true) {
        match emojis::get(grapheme) {
            Some(found) => {
                demojized.push('{');
                demojized.push_str(&token_name(found.name()));
                demojized.push('}');
            }
            None => demojized.push_str(grapheme),
        }
    }
    let flattened = demojized.replace('\t', " ").replace('\n', " ");
    SPACE_RUN.replace_all(&flattened, " ").trim().to_string()
}
