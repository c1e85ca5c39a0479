//! Core types for classification and presence diffs

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Category of a classified leaf disagreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffBucket {
    /// A display-width field differs
    LayoutWidth,
    /// Strings differ only by full-width vs half-width digits
    NumericGlyphFormat,
    /// Any other non-text string difference
    ContentOther,
}

impl DiffBucket {
    /// All buckets in report order
    pub const ALL: [Self; 3] = [Self::LayoutWidth, Self::NumericGlyphFormat, Self::ContentOther];

    /// Human-readable name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LayoutWidth => "layout width",
            Self::NumericGlyphFormat => "numeric glyph format",
            Self::ContentOther => "other content",
        }
    }
}

impl fmt::Display for DiffBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket counts plus the grand total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffCounts {
    /// Width-field differences
    pub layout_width: usize,
    /// Full-width/half-width digit differences
    pub numeric_glyph_format: usize,
    /// Other non-text differences
    pub content_other: usize,
    /// Sum of all buckets
    pub total: usize,
}

impl DiffCounts {
    /// Count one leaf under `bucket`
    pub fn add(&mut self, bucket: DiffBucket) {
        match bucket {
            DiffBucket::LayoutWidth => self.layout_width += 1,
            DiffBucket::NumericGlyphFormat => self.numeric_glyph_format += 1,
            DiffBucket::ContentOther => self.content_other += 1,
        }
        self.total += 1;
    }

    /// Count for `bucket`
    #[must_use]
    pub fn get(&self, bucket: DiffBucket) -> usize {
        match bucket {
            DiffBucket::LayoutWidth => self.layout_width,
            DiffBucket::NumericGlyphFormat => self.numeric_glyph_format,
            DiffBucket::ContentOther => self.content_other,
        }
    }

    /// Share of the total in `bucket`, in percent (0 when nothing was counted)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self, bucket: DiffBucket) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.get(bucket) as f64 / self.total as f64 * 100.0
    }

    /// Add another set of counts into this one
    pub fn merge(&mut self, other: &DiffCounts) {
        self.layout_width += other.layout_width;
        self.numeric_glyph_format += other.numeric_glyph_format;
        self.content_other += other.content_other;
        self.total += other.total;
    }

    /// Whether nothing was classified
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} width, {} numeric format, {} other ({} total)",
            self.layout_width, self.numeric_glyph_format, self.content_other, self.total
        )
    }
}

/// One human-readable structural difference
#[derive(Debug, Clone, PartialEq)]
pub enum PresenceDifference {
    /// Keys of the first document missing from the second
    MissingKeys {
        /// Name of the second document
        side: String,
        /// Missing keys, sorted
        keys: Vec<String>,
    },
    /// Keys of the second document absent from the first
    ExtraKeys {
        /// Name of the second document
        side: String,
        /// Extra keys, sorted
        keys: Vec<String>,
    },
    /// Arrays under the same key have different lengths
    ListLength {
        /// Key holding the arrays
        key: String,
        /// Length in the first document
        left: usize,
        /// Length in the second document
        right: usize,
    },
    /// Non-text values differ
    ValueDiffers {
        /// Key holding the values
        key: String,
        /// Array index, when the values are array elements
        index: Option<usize>,
        /// Value in the first document
        left: Value,
        /// Value in the second document
        right: Value,
    },
    /// A difference found inside a nested object
    Nested {
        /// Key of the nested object
        key: String,
        /// Array index, when the object is an array element
        index: Option<usize>,
        /// The inner difference
        inner: Box<PresenceDifference>,
    },
    /// The document roots are not both objects and differ
    RootMismatch {
        /// Root of the first document
        left: Value,
        /// Root of the second document
        right: Value,
    },
}

impl PresenceDifference {
    /// Innermost difference, with nesting stripped
    #[must_use]
    pub fn leaf(&self) -> &PresenceDifference {
        match self {
            Self::Nested { inner, .. } => inner.leaf(),
            other => other,
        }
    }
}

/// Strings without quotes, everything else as JSON
struct Plain<'a>(&'a Value);

impl fmt::Display for Plain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for PresenceDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKeys { side, keys } => write!(f, "{side} is missing keys: {keys:?}"),
            Self::ExtraKeys { side, keys } => write!(f, "{side} has extra keys: {keys:?}"),
            Self::ListLength { key, left, right } => {
                write!(f, "key '{key}' list length differs: {left} vs {right}")
            }
            Self::ValueDiffers {
                key,
                index: None,
                left,
                right,
            } => write!(f, "key '{key}' value differs: {} vs {}", Plain(left), Plain(right)),
            Self::ValueDiffers {
                key,
                index: Some(i),
                left,
                right,
            } => write!(
                f,
                "key '{key}' list index {i} value differs: {} vs {}",
                Plain(left),
                Plain(right)
            ),
            Self::Nested {
                key,
                index: None,
                inner,
            } => write!(f, "under key '{key}': {inner}"),
            Self::Nested {
                key,
                index: Some(i),
                inner,
            } => write!(f, "under key '{key}' list index {i}: {inner}"),
            Self::RootMismatch { left, right } => {
                write!(f, "document roots differ: {} vs {}", Plain(left), Plain(right))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counts_merge_and_percentage() {
        let mut counts = DiffCounts::default();
        counts.add(DiffBucket::LayoutWidth);
        counts.add(DiffBucket::LayoutWidth);
        counts.add(DiffBucket::LayoutWidth);
        counts.add(DiffBucket::ContentOther);

        let mut total = DiffCounts::default();
        total.merge(&counts);
        total.merge(&counts);
        assert_eq!(total.layout_width, 6);
        assert_eq!(total.total, 8);
        assert!((total.percentage(DiffBucket::LayoutWidth) - 75.0).abs() < f64::EPSILON);
        assert!(DiffCounts::default().percentage(DiffBucket::ContentOther).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display_nested_value() {
        let diff = PresenceDifference::Nested {
            key: "labelDataArray".to_string(),
            index: Some(3),
            inner: Box::new(PresenceDifference::ValueDiffers {
                key: "styleIndex".to_string(),
                index: None,
                left: json!(1),
                right: json!("x"),
            }),
        };
        assert_eq!(
            diff.to_string(),
            "under key 'labelDataArray' list index 3: key 'styleIndex' value differs: 1 vs x"
        );
        assert!(matches!(diff.leaf(), PresenceDifference::ValueDiffers { .. }));
    }

    #[test]
    fn test_display_missing_keys() {
        let diff = PresenceDifference::MissingKeys {
            side: "korean_a.json".to_string(),
            keys: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(diff.to_string(), "korean_a.json is missing keys: [\"a\", \"b\"]");
    }
}
