//! Raw catalog records as the backend sends them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One backend NFT entry as received, in whatever shape it has.
///
/// The record is a best-effort view over a JSON object. Any JSON value
/// deserializes into it (non-objects become an empty record), so a single odd
/// entry can never fail the decoding of a whole catalog payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CatalogRecord(Map<String, Value>);

impl<'de> Deserialize<'de> for CatalogRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl CatalogRecord {
    /// Wrap a JSON value. Anything but an object yields an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Raw field access.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty scalar field as text.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_text)
    }

    /// The `raw_metadata` object, if present and an object.
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.0.get("raw_metadata").and_then(Value::as_object)
    }

    /// Non-empty scalar field of `raw_metadata` as text.
    pub fn metadata_text(&self, key: &str) -> Option<String> {
        self.metadata()?.get(key).and_then(scalar_text)
    }

    /// `raw_metadata.collection.name`.
    pub fn collection_name(&self) -> Option<String> {
        self.metadata()?
            .get("collection")?
            .as_object()?
            .get("name")
            .and_then(scalar_text)
    }

    /// The `attributes` field in whatever shape it arrived.
    pub fn attributes(&self) -> Option<&Value> {
        self.0.get("attributes")
    }

    /// Whether the record carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for CatalogRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Scalars that count as "present": non-empty strings, numbers, booleans.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// String form of an attribute value.
///
/// Strings are kept verbatim, `null` becomes `"null"`, everything else is
/// rendered as compact JSON.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> CatalogRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_non_object_becomes_empty() {
        assert!(record(json!("oops")).is_empty());
        assert!(record(json!(42)).is_empty());
        assert!(record(json!(null)).is_empty());
    }

    #[test]
    fn test_payload_with_odd_entries_still_decodes() {
        let records: Vec<CatalogRecord> =
            serde_json::from_str(r#"[{"name": "A"}, 7, null, {"token_id": 3}]"#).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].text("name").as_deref(), Some("A"));
        assert_eq!(records[3].text("token_id").as_deref(), Some("3"));
    }

    #[test]
    fn test_empty_string_is_absent() {
        let r = record(json!({"name": "", "chain": "Polygon"}));
        assert_eq!(r.text("name"), None);
        assert_eq!(r.text("chain").as_deref(), Some("Polygon"));
    }

    #[test]
    fn test_metadata_lookups() {
        let r = record(json!({
            "raw_metadata": {
                "image": "ipfs://img",
                "collection": {"name": "Apes"},
                "minted_date": "2024-01-02"
            }
        }));
        assert_eq!(r.metadata_text("image").as_deref(), Some("ipfs://img"));
        assert_eq!(r.metadata_text("image_url"), None);
        assert_eq!(r.collection_name().as_deref(), Some("Apes"));
        assert_eq!(r.metadata_text("minted_date").as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_metadata_wrong_shape() {
        let r = record(json!({"raw_metadata": "not an object", "name": "x"}));
        assert!(r.metadata().is_none());
        assert_eq!(r.collection_name(), None);

        let r = record(json!({"raw_metadata": {"collection": "flat"}}));
        assert_eq!(r.collection_name(), None);
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("Gold")), "Gold");
        assert_eq!(value_text(&json!(5)), "5");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!(null)), "null");
        assert_eq!(value_text(&json!([1, 2])), "[1,2]");
    }
}
