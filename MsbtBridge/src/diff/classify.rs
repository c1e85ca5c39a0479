//! Leaf-value classifier over two structurally parallel documents

use serde_json::Value;

use crate::heuristics::is_fullwidth_halfwidth_variant;

use super::policy::LeafPolicy;
use super::types::{DiffBucket, DiffCounts};

/// Walk `a` and `b` together and bucket every disagreeing leaf.
///
/// Objects recurse into keys of `a` that `b` also has, in `a`'s order; arrays
/// recurse pairwise up to the shorter length. Presence and length differences
/// are not counted here, see [`presence_diff`](super::presence_diff).
#[must_use]
pub fn classify_differences(a: &Value, b: &Value, policy: &dyn LeafPolicy) -> DiffCounts {
    let mut counts = DiffCounts::default();
    let mut path = String::new();
    walk(a, b, &mut path, policy, &mut counts);
    counts
}

/// Value equality with numbers compared by value, so `10` equals `10.0`.
///
/// Arrays and objects compare element-wise under the same rule; everything
/// else falls back to `==`.
#[must_use]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_f64() || y.is_f64() => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len() && x.iter().all(|(key, x)| y.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Bucket for a single leaf pair at `path`, if any
#[must_use]
pub fn classify_leaf(path: &str, a: &Value, b: &Value, policy: &dyn LeafPolicy) -> Option<DiffBucket> {
    if policy.is_width_field(path) && !values_equal(a, b) {
        return Some(DiffBucket::LayoutWidth);
    }
    let (Value::String(a), Value::String(b)) = (a, b) else {
        return None;
    };
    if is_fullwidth_halfwidth_variant(a, b) {
        Some(DiffBucket::NumericGlyphFormat)
    } else if a != b && !policy.is_text_field(path) {
        Some(DiffBucket::ContentOther)
    } else {
        None
    }
}

fn walk(a: &Value, b: &Value, path: &mut String, policy: &dyn LeafPolicy, counts: &mut DiffCounts) {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => {
            for (key, a_value) in a {
                let Some(b_value) = b.get(key) else {
                    continue;
                };
                let len = path.len();
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(key);
                walk(a_value, b_value, path, policy, counts);
                path.truncate(len);
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            for (i, (a_item, b_item)) in a.iter().zip(b).enumerate() {
                let len = path.len();
                path.push('[');
                path.push_str(&i.to_string());
                path.push(']');
                walk(a_item, b_item, path, policy, counts);
                path.truncate(len);
            }
        }
        _ => {
            if let Some(bucket) = classify_leaf(path, a, b, policy) {
                counts.add(bucket);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::SuffixPolicy;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn classify(a: &Value, b: &Value) -> DiffCounts {
        classify_differences(a, b, &SuffixPolicy::default())
    }

    fn doc(text: &str, width: i64, status: &str) -> Value {
        json!({
            "m_Name": "x",
            "status": status,
            "labelDataArray": [
                {"labelName": "a", "wordDataArray": [{"str": text, "strWidth": width}]}
            ]
        })
    }

    #[test]
    fn test_width_difference() {
        let counts = classify(&doc("같음", 10, "A"), &doc("같음", 12, "A"));
        assert_eq!(
            counts,
            DiffCounts {
                layout_width: 1,
                total: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_numeric_glyph_difference() {
        let counts = classify(&json!({"count": "１２"}), &json!({"count": "12"}));
        assert_eq!(
            counts,
            DiffCounts {
                numeric_glyph_format: 1,
                total: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_other_difference() {
        let counts = classify(&json!({"status": "A"}), &json!({"status": "B"}));
        assert_eq!(
            counts,
            DiffCounts {
                content_other: 1,
                total: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_text_field_ignored() {
        let counts = classify(&doc("한국어", 10, "A"), &doc("中文", 10, "A"));
        assert!(counts.is_empty());
    }

    #[test]
    fn test_numeric_format_in_text_field_still_counted() {
        let counts = classify(&doc("１２", 10, "A"), &doc("12", 10, "A"));
        assert_eq!(counts.numeric_glyph_format, 1);
    }

    #[test]
    fn test_width_wins_over_numeric_format() {
        let counts = classify(&json!({"strWidth": "１"}), &json!({"strWidth": "1"}));
        assert_eq!(counts.layout_width, 1);
        assert_eq!(counts.numeric_glyph_format, 0);
    }

    #[test]
    fn test_presence_and_length_ignored() {
        let a = json!({"only_a": "x", "list": ["p", "q", "r"]});
        let b = json!({"only_b": "y", "list": ["p", "q"]});
        assert!(classify(&a, &b).is_empty());
    }

    #[test]
    fn test_typed_mismatch_not_normalized() {
        let counts = classify(&json!({"id": 1}), &json!({"id": "1"}));
        assert!(counts.is_empty());
        let counts = classify(&json!({"id": {"k": 1}}), &json!({"id": "1"}));
        assert!(counts.is_empty());
    }

    #[test]
    fn test_integer_and_float_width_are_equal() {
        let counts = classify(&json!({"strWidth": 10}), &json!({"strWidth": 10.0}));
        assert!(counts.is_empty());
        let counts = classify(&json!({"strWidth": 10}), &json!({"strWidth": 10.5}));
        assert_eq!(counts.layout_width, 1);
    }

    #[test]
    fn test_values_equal() {
        assert!(values_equal(&json!(40), &json!(40.0)));
        assert!(values_equal(&json!([1, {"w": 2}]), &json!([1.0, {"w": 2.0}])));
        assert!(!values_equal(&json!(1), &json!("1")));
        assert!(!values_equal(&json!({"a": 1}), &json!({"b": 1})));
        assert!(!values_equal(&json!(u64::MAX), &json!(u64::MAX - 1)));
    }

    #[test]
    fn test_equal_documents() {
        assert!(classify(&doc("a", 1, "A"), &doc("a", 1, "A")).is_empty());
    }
}
