//! Presence diff: missing keys, list lengths and non-text value changes

use serde_json::{Map, Value};

use crate::heuristics::is_likely_text;

use super::classify::values_equal;
use super::types::PresenceDifference;

/// List the structural differences between `a` and `b`.
///
/// `b_name` labels the second document in missing/extra key messages. Keys
/// are visited in sorted order; values the text heuristic flags as natural
/// language are not compared.
#[must_use]
pub fn presence_diff(a: &Value, b: &Value, b_name: &str) -> Vec<PresenceDifference> {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => compare_objects(a, b, b_name),
        _ if values_equal(a, b) => Vec::new(),
        _ => vec![PresenceDifference::RootMismatch {
            left: a.clone(),
            right: b.clone(),
        }],
    }
}

fn compare_objects(a: &Map<String, Value>, b: &Map<String, Value>, b_name: &str) -> Vec<PresenceDifference> {
    let mut differences = Vec::new();

    let mut missing: Vec<String> = a.keys().filter(|k| !b.contains_key(*k)).cloned().collect();
    let mut extra: Vec<String> = b.keys().filter(|k| !a.contains_key(*k)).cloned().collect();
    missing.sort();
    extra.sort();
    if !missing.is_empty() {
        differences.push(PresenceDifference::MissingKeys {
            side: b_name.to_string(),
            keys: missing,
        });
    }
    if !extra.is_empty() {
        differences.push(PresenceDifference::ExtraKeys {
            side: b_name.to_string(),
            keys: extra,
        });
    }

    let mut common: Vec<&String> = a.keys().filter(|k| b.contains_key(*k)).collect();
    common.sort();

    for key in common {
        let (Some(a_value), Some(b_value)) = (a.get(key), b.get(key)) else {
            continue;
        };
        match (a_value, b_value) {
            (Value::Object(a_obj), Value::Object(b_obj)) => {
                nest(&mut differences, key, None, compare_objects(a_obj, b_obj, b_name));
            }
            (Value::Array(a_list), Value::Array(b_list)) => {
                if a_list.len() != b_list.len() {
                    differences.push(PresenceDifference::ListLength {
                        key: key.clone(),
                        left: a_list.len(),
                        right: b_list.len(),
                    });
                    continue;
                }
                for (i, (a_item, b_item)) in a_list.iter().zip(b_list).enumerate() {
                    if let (Value::Object(a_obj), Value::Object(b_obj)) = (a_item, b_item) {
                        nest(&mut differences, key, Some(i), compare_objects(a_obj, b_obj, b_name));
                    } else if !is_likely_text(key, a_item) && !is_likely_text(key, b_item) && !values_equal(a_item, b_item) {
                        differences.push(PresenceDifference::ValueDiffers {
                            key: key.clone(),
                            index: Some(i),
                            left: a_item.clone(),
                            right: b_item.clone(),
                        });
                    }
                }
            }
            _ => {
                if !is_likely_text(key, a_value) && !is_likely_text(key, b_value) && !values_equal(a_value, b_value) {
                    differences.push(PresenceDifference::ValueDiffers {
                        key: key.clone(),
                        index: None,
                        left: a_value.clone(),
                        right: b_value.clone(),
                    });
                }
            }
        }
    }

    differences
}

fn nest(out: &mut Vec<PresenceDifference>, key: &str, index: Option<usize>, inner: Vec<PresenceDifference>) {
    out.extend(inner.into_iter().map(|inner| PresenceDifference::Nested {
        key: key.to_string(),
        index,
        inner: Box::new(inner),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn lines(a: &Value, b: &Value) -> Vec<String> {
        presence_diff(a, b, "b.json").iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_identical() {
        let doc = json!({"m_Name": "x", "labelDataArray": [{"labelName": "a"}]});
        assert!(presence_diff(&doc, &doc, "b.json").is_empty());
    }

    #[test]
    fn test_missing_and_extra_keys_sorted() {
        let a = json!({"z": 1, "a": 1, "keep": 1});
        let b = json!({"keep": 1, "new": 2});
        assert_eq!(
            lines(&a, &b),
            vec![
                "b.json is missing keys: [\"a\", \"z\"]".to_string(),
                "b.json has extra keys: [\"new\"]".to_string(),
            ]
        );
    }

    #[test]
    fn test_list_length_not_descended() {
        let a = json!({"labelDataArray": [{"x": 1}, {"x": 2}]});
        let b = json!({"labelDataArray": [{"x": 9}]});
        assert_eq!(lines(&a, &b), vec!["key 'labelDataArray' list length differs: 2 vs 1".to_string()]);
    }

    #[test]
    fn test_nested_value_difference() {
        let a = json!({"labelDataArray": [{"labelName": "a", "styleInfo": {"styleIndex": 1}}]});
        let b = json!({"labelDataArray": [{"labelName": "a", "styleInfo": {"styleIndex": 2}}]});
        assert_eq!(
            lines(&a, &b),
            vec!["under key 'labelDataArray' list index 0: under key 'styleInfo': key 'styleIndex' value differs: 1 vs 2".to_string()]
        );
    }

    #[test]
    fn test_text_values_skipped() {
        let long_a = "가".repeat(60);
        let long_b = "中".repeat(60);
        let a = json!({"item_name": "Potion", "desc": long_a, "id": "ab-1"});
        let b = json!({"item_name": "药水", "desc": long_b, "id": "ab-2"});
        assert_eq!(lines(&a, &b), vec!["key 'id' value differs: ab-1 vs ab-2".to_string()]);
    }

    #[test]
    fn test_scalar_list_elements() {
        let a = json!({"tags": [1, 2, 3]});
        let b = json!({"tags": [1, 5, 3]});
        assert_eq!(lines(&a, &b), vec!["key 'tags' list index 1 value differs: 2 vs 5".to_string()]);
    }

    #[test]
    fn test_integer_and_float_compare_by_value() {
        assert!(lines(&json!({"w": 1, "tags": [2, 3]}), &json!({"w": 1.0, "tags": [2.0, 3]})).is_empty());
        assert!(presence_diff(&json!(5), &json!(5.0), "b.json").is_empty());
        assert_eq!(lines(&json!({"w": 1}), &json!({"w": 1.5})), vec!["key 'w' value differs: 1 vs 1.5".to_string()]);
    }

    #[test]
    fn test_shape_mismatch_reported() {
        let a = json!({"info": {"k": 1}});
        let b = json!({"info": [1]});
        assert_eq!(lines(&a, &b), vec!["key 'info' value differs: {\"k\":1} vs [1]".to_string()]);
    }
}
