//! Path predicates used by the classifier

use serde::{Deserialize, Serialize};

use crate::document::keys;

/// Decides, from a synthetic `a.b[0].c` path, what kind of leaf is being compared.
pub trait LeafPolicy: Send + Sync {
    /// Whether the leaf is a display-width field
    fn is_width_field(&self, path: &str) -> bool;

    /// Whether the leaf is a generic text field whose differences are expected
    fn is_text_field(&self, path: &str) -> bool;
}

/// Plain string-suffix tests on the built path.
///
/// The suffix is not segment-aware: with the default `str` text suffix any
/// path whose last key ends in `str` counts as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuffixPolicy {
    /// Suffix marking width fields
    pub width_suffix: String,
    /// Suffix marking text fields
    pub text_suffix: String,
}

impl Default for SuffixPolicy {
    fn default() -> Self {
        Self {
            width_suffix: keys::WIDTH.to_string(),
            text_suffix: keys::TEXT.to_string(),
        }
    }
}

impl LeafPolicy for SuffixPolicy {
    fn is_width_field(&self, path: &str) -> bool {
        !self.width_suffix.is_empty() && path.ends_with(&self.width_suffix)
    }

    fn is_text_field(&self, path: &str) -> bool {
        !self.text_suffix.is_empty() && path.ends_with(&self.text_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_suffixes() {
        let policy = SuffixPolicy::default();
        assert!(policy.is_width_field("labelDataArray[0].wordDataArray[1].strWidth"));
        assert!(!policy.is_width_field("labelDataArray[0].wordDataArray[1].str"));
        assert!(policy.is_text_field("labelDataArray[0].wordDataArray[1].str"));
        assert!(!policy.is_text_field("labelDataArray[0].labelName"));
    }

    #[test]
    fn test_empty_suffix_never_matches() {
        let policy = SuffixPolicy {
            width_suffix: String::new(),
            text_suffix: String::new(),
        };
        assert!(!policy.is_width_field("strWidth"));
        assert!(!policy.is_text_field("str"));
    }
}
