//! "Is this field natural-language text?" heuristic

use serde_json::Value;

/// Key fragments that mark a field as language-bearing
pub const TEXT_KEY_MARKERS: [&str; 8] = [
    "_text", "_name", "_desc", "_title", "text_", "name_", "desc_", "title_",
];

/// Values longer than this many characters are treated as prose
pub const LONG_VALUE_CHARS: usize = 50;

/// Values up to this many identifier characters are treated as identifiers
pub const SHORT_IDENTIFIER_CHARS: usize = 5;

/// Which rule decided a text-field classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFieldVerdict {
    /// The value is not a string
    NotString,
    /// The key contains a text marker
    KeyMarker,
    /// The value is long enough to be prose
    LongValue,
    /// The value is all digits
    Digits,
    /// The value is a short identifier-like token
    ShortIdentifier,
    /// No rule matched
    Undecided,
}

impl TextFieldVerdict {
    /// Whether the verdict flags the field as likely text
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::KeyMarker | Self::LongValue)
    }
}

/// Classify a `(key, value)` pair; first matching rule wins.
#[must_use]
pub fn classify_text_field(key: &str, value: &Value) -> TextFieldVerdict {
    let Some(text) = value.as_str() else {
        return TextFieldVerdict::NotString;
    };

    let key = key.to_lowercase();
    if TEXT_KEY_MARKERS.iter().any(|marker| key.contains(marker)) {
        return TextFieldVerdict::KeyMarker;
    }

    let char_count = text.chars().count();
    if char_count > LONG_VALUE_CHARS {
        return TextFieldVerdict::LongValue;
    }

    if !text.is_empty() && text.chars().all(char::is_numeric) {
        return TextFieldVerdict::Digits;
    }

    if char_count <= SHORT_IDENTIFIER_CHARS
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return TextFieldVerdict::ShortIdentifier;
    }

    TextFieldVerdict::Undecided
}

/// Whether `value` under `key` is probably natural-language text.
///
/// Conservative: only obvious text is flagged, everything else is "not text".
#[must_use]
pub fn is_likely_text(key: &str, value: &Value) -> bool {
    classify_text_field(key, value).is_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_marker() {
        assert!(is_likely_text("item_name", &json!("Potion")));
        assert!(is_likely_text("TITLE_main", &json!("x")));
        assert_eq!(
            classify_text_field("Item_Desc", &json!("1")),
            TextFieldVerdict::KeyMarker
        );
    }

    #[test]
    fn test_long_value() {
        let long = "A".repeat(60);
        assert!(is_likely_text("desc", &json!(long)));
        // 51 characters of multi-byte text still counts by characters
        assert!(is_likely_text("x", &json!("가".repeat(51))));
        assert!(!is_likely_text("x", &json!("가".repeat(50))));
    }

    #[test]
    fn test_digits_and_identifiers() {
        assert!(!is_likely_text("count", &json!("42")));
        assert_eq!(classify_text_field("count", &json!("42")), TextFieldVerdict::Digits);
        assert!(!is_likely_text("id", &json!("ab-1")));
        assert_eq!(
            classify_text_field("id", &json!("ab-1")),
            TextFieldVerdict::ShortIdentifier
        );
    }

    #[test]
    fn test_non_string_and_default() {
        assert_eq!(classify_text_field("item_name", &json!(3)), TextFieldVerdict::NotString);
        assert_eq!(
            classify_text_field("status", &json!("two words")),
            TextFieldVerdict::Undecided
        );
        assert!(!is_likely_text("status", &json!("two words")));
    }
}
