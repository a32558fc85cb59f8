//! Random test/demo payload composition.

use super::emoji::random_emojis;
use uuid::Uuid;

/// Compose a unique random payload: `"{identity} {short_uid} {emoji sequence}"`.
///
/// `short_uid` is the first hyphen-delimited segment of a v4 UUID (8 hex
/// chars), making two consecutive payloads distinct with overwhelming
/// probability. The emoji sequence is `emoji_count` distinct glyphs from the
/// curated catalog, space separated.
pub fn compose_random_message(identity: &str, emoji_count: i32) -> String {
    let uid = short_uid();
    let emojis = random_emojis(emoji_count).join(" ");
    format!("{} {} {}", identity, uid, emojis)
}

fn short_uid() -> String {
    let uuid = Uuid::new_v4().to_string();
    uuid.split('-').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_shape() {
        let message = compose_random_message("sms-gateway (v0.1.0) LIVE", 6);
        assert!(message.starts_with("sms-gateway (v0.1.0) LIVE "));
        // identity (3 words) + uid + 6 glyphs
        assert_eq!(message.split(' ').count(), 10);
    }

    #[test]
    fn test_short_uid_is_eight_hex_chars() {
        let uid = short_uid();
        assert_eq!(uid.len(), 8);
        assert!(uid.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_consecutive_payloads_differ() {
        let first = compose_random_message("id", 1);
        let second = compose_random_message("id", 1);
        assert_ne!(first, second);
    }
}
