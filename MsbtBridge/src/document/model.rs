//! MSBT export document structures
//!
//! An export is a JSON object with a label array; each label carries an
//! ordered word array. Only the fields the engine reads or rewrites are typed,
//! everything else rides along in a [`FieldBag`] so that a load → save cycle
//! reproduces the source key order.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use super::fields::FieldBag;

/// JSON keys used by MSBT exports
pub mod keys {
    /// Asset identity name (renamed per target language)
    pub const IDENTITY_NAME: &str = "m_Name";
    /// Asset bundle name
    pub const BUNDLE_NAME: &str = "m_AssetBundleName";
    /// Label array
    pub const LABELS: &str = "labelDataArray";
    /// Label identifier
    pub const LABEL_NAME: &str = "labelName";
    /// Word array of a label
    pub const WORDS: &str = "wordDataArray";
    /// Displayable text of a word
    pub const TEXT: &str = "str";
    /// Rendered width of a word
    pub const WIDTH: &str = "strWidth";
}

/// A localization export for one target language of one asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalizationDocument {
    /// Asset identity name (`m_Name`).
    pub identity_name: Option<String>,
    /// Asset bundle name (`m_AssetBundleName`).
    pub bundle_name: Option<String>,
    /// Ordered labels, `None` for documents without a label array (asset indexes).
    pub labels: Option<Vec<Label>>,
    /// Every other top-level field.
    pub extra: FieldBag,
}

/// A named unit of translatable content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    /// Label identifier, the natural key for cross-document alignment.
    pub name: Option<String>,
    /// Ordered word entries, `None` when the label has no word array.
    pub words: Option<Vec<WordEntry>>,
    /// Every other label field.
    pub extra: FieldBag,
}

/// One displayable text fragment plus layout metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordEntry {
    /// Displayable text (`str`).
    pub text: Option<String>,
    /// Rendered width (`strWidth`), kept as the exact JSON number.
    pub width: Option<Number>,
    /// Every other word field.
    pub extra: FieldBag,
}

impl LocalizationDocument {
    /// Whether this document carries a label array
    #[must_use]
    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    /// Label slice (empty for asset-index documents)
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        self.labels.as_deref().unwrap_or_default()
    }

    /// Top-level keys in source order
    pub fn top_level_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.extra.keys().map(str::to_string).collect();
        for (key, present) in [
            (keys::IDENTITY_NAME, self.identity_name.is_some()),
            (keys::BUNDLE_NAME, self.bundle_name.is_some()),
            (keys::LABELS, self.labels.is_some()),
        ] {
            if present && !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
        keys
    }

    /// Convert to a generic JSON value (for structural diffing)
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl Label {
    /// Create a label with the given name and words
    #[must_use]
    pub fn new(name: impl Into<String>, words: Vec<WordEntry>) -> Self {
        Self {
            name: Some(name.into()),
            words: Some(words),
            extra: FieldBag::new(),
        }
    }

    /// Word slice (empty when the label has no word array)
    #[must_use]
    pub fn words(&self) -> &[WordEntry] {
        self.words.as_deref().unwrap_or_default()
    }

    /// Texts of all words, in order
    pub fn texts(&self) -> Vec<Option<&str>> {
        self.words().iter().map(|w| w.text.as_deref()).collect()
    }
}

impl WordEntry {
    /// Create a word with text and an integer width
    #[must_use]
    pub fn new(text: impl Into<String>, width: i64) -> Self {
        Self {
            text: Some(text.into()),
            width: Some(Number::from(width)),
            extra: FieldBag::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

fn read_fields<'de, D: Deserializer<'de>>(deserializer: D) -> Result<IndexMap<String, Value>, D::Error> {
    IndexMap::deserialize(deserializer)
}

/// Typed array members are only taken when every element is an object;
/// anything else stays opaque so it is written back untouched.
fn is_object_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_object))
}

impl Serialize for WordEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.extra
            .serialize_into(&mut map, &[keys::TEXT, keys::WIDTH], |key, map| match key {
                keys::TEXT => emit(map, key, self.text.as_ref()),
                keys::WIDTH => emit(map, key, self.width.as_ref()),
                _ => Ok(false),
            })?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for WordEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut word = WordEntry::default();
        for (key, value) in read_fields(deserializer)? {
            if key == keys::TEXT && value.is_string() {
                word.text = value.as_str().map(str::to_string);
                word.extra.mark_typed(key);
            } else if let (keys::WIDTH, Value::Number(width)) = (key.as_str(), &value) {
                word.width = Some(width.clone());
                word.extra.mark_typed(keys::WIDTH);
            } else {
                word.extra.insert(key, value);
            }
        }
        Ok(word)
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.extra
            .serialize_into(&mut map, &[keys::LABEL_NAME, keys::WORDS], |key, map| match key {
                keys::LABEL_NAME => emit(map, key, self.name.as_ref()),
                keys::WORDS => emit(map, key, self.words.as_ref()),
                _ => Ok(false),
            })?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut label = Label::default();
        for (key, value) in read_fields(deserializer)? {
            if key == keys::LABEL_NAME && value.is_string() {
                label.name = value.as_str().map(str::to_string);
                label.extra.mark_typed(key);
            } else if key == keys::WORDS && is_object_array(&value) {
                let words: Vec<WordEntry> =
                    serde_json::from_value(value).map_err(serde::de::Error::custom)?;
                label.words = Some(words);
                label.extra.mark_typed(key);
            } else {
                label.extra.insert(key, value);
            }
        }
        Ok(label)
    }
}

impl Serialize for LocalizationDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.extra.serialize_into(
            &mut map,
            &[keys::IDENTITY_NAME, keys::BUNDLE_NAME, keys::LABELS],
            |key, map| match key {
                keys::IDENTITY_NAME => emit(map, key, self.identity_name.as_ref()),
                keys::BUNDLE_NAME => emit(map, key, self.bundle_name.as_ref()),
                keys::LABELS => emit(map, key, self.labels.as_ref()),
                _ => Ok(false),
            },
        )?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for LocalizationDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut doc = LocalizationDocument::default();
        for (key, value) in read_fields(deserializer)? {
            if key == keys::IDENTITY_NAME && value.is_string() {
                doc.identity_name = value.as_str().map(str::to_string);
                doc.extra.mark_typed(key);
            } else if key == keys::BUNDLE_NAME && value.is_string() {
                doc.bundle_name = value.as_str().map(str::to_string);
                doc.extra.mark_typed(key);
            } else if key == keys::LABELS && is_object_array(&value) {
                let labels: Vec<Label> =
                    serde_json::from_value(value).map_err(serde::de::Error::custom)?;
                doc.labels = Some(labels);
                doc.extra.mark_typed(key);
            } else {
                doc.extra.insert(key, value);
            }
        }
        Ok(doc)
    }
}

fn emit<M, T>(map: &mut M, key: &str, value: Option<&T>) -> Result<bool, M::Error>
where
    M: SerializeMap,
    T: Serialize + ?Sized,
{
    match value {
        Some(value) => {
            map.serialize_entry(key, value)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SAMPLE: &str = r#"{"m_GameObject":{"m_FileID":0},"m_Name":"korean_ss_menu","labelDataArray":[{"labelIndex":0,"arrayIndex":0,"labelName":"msg_01","styleInfo":{"styleIndex":1},"wordDataArray":[{"patternID":-1,"eventID":7,"str":"확인","strWidth":33.5}]}],"m_AssetBundleName":"korean","tail":[1,2]}"#;

    #[test]
    fn test_roundtrip_preserves_key_order() {
        let doc: LocalizationDocument = serde_json::from_str(SAMPLE).unwrap();
        let out = serde_json::to_string(&doc).unwrap();
        assert_eq!(out, SAMPLE);
    }

    #[test]
    fn test_typed_fields_extracted() {
        let doc: LocalizationDocument = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(doc.identity_name.as_deref(), Some("korean_ss_menu"));
        assert_eq!(doc.bundle_name.as_deref(), Some("korean"));
        let label = &doc.labels()[0];
        assert_eq!(label.name.as_deref(), Some("msg_01"));
        assert_eq!(label.words()[0].text.as_deref(), Some("확인"));
        assert_eq!(label.words()[0].width, Number::from_f64(33.5));
        assert_eq!(label.extra.get("labelIndex"), Some(&json!(0)));
    }

    #[test]
    fn test_missing_label_array_is_asset_index() {
        let doc: LocalizationDocument =
            serde_json::from_str(r#"{"m_Name":"korean","m_Container":[]}"#).unwrap();
        assert!(!doc.has_labels());
        assert!(doc.labels().is_empty());
    }

    #[test]
    fn test_non_string_text_stays_opaque() {
        let word: WordEntry = serde_json::from_value(json!({"str": null, "strWidth": "wide"})).unwrap();
        assert!(word.text.is_none());
        assert!(word.width.is_none());
        assert_eq!(
            serde_json::to_value(&word).unwrap(),
            json!({"str": null, "strWidth": "wide"})
        );
    }

    #[test]
    fn test_set_text_overrides_opaque_value() {
        let mut word: WordEntry = serde_json::from_value(json!({"a": 1, "str": null})).unwrap();
        word.text = Some("filled".to_string());
        assert_eq!(
            serde_json::to_string(&word).unwrap(),
            r#"{"a":1,"str":"filled"}"#
        );
    }

    #[test]
    fn test_new_typed_fields_appended() {
        let word = WordEntry::new("abc", 12);
        assert_eq!(
            serde_json::to_string(&word).unwrap(),
            r#"{"str":"abc","strWidth":12}"#
        );
    }

    #[test]
    fn test_top_level_keys() {
        let doc: LocalizationDocument = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(
            doc.top_level_keys(),
            vec!["m_GameObject", "m_Name", "labelDataArray", "m_AssetBundleName", "tail"]
        );
    }
}
