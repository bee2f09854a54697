//! # Domain Model: Documents
//!
//! A [`Document`] is one editor tab: a store-assigned integer id, a display name
//! (usually a filename such as `notes.md`) and the full text body.
//!
//! ## Contractual vs Presentation Fields
//!
//! Only `id`, `name` and `content` are contractual. Everything else a client
//! attaches to a tab (color, pin flag, timestamps, sort order, or keys this crate
//! has never heard of) lives in [`Attributes`], an opaque JSON map that is carried
//! through store, export and import untouched.
//!
//! [`Attributes`] offers lenient typed accessors for the well-known keys. They
//! return `None` rather than failing when a value has an unexpected shape, so a
//! backup written by a newer or buggier client never blocks a restore.
//!
//! ## Identity
//!
//! Ids belong to the store. [`NewDocument`] is a document without one: it is what
//! `add` accepts and what every imported record becomes once its id is stripped.
//!
//! ## Wire Names
//!
//! ```text
//! { "id": 3, "name": "todo.md", "content": "...",
//!   "color": "#3b82f6", "isPinned": true, "order": 3,
//!   "createdAt": "2024-01-01T00:00:00.000Z", "updatedAt": "..." }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type DocumentId = i64;

/// Keys owned by [`Document`] itself; never stored in [`Attributes`].
pub const RESERVED_KEYS: [&str; 3] = ["id", "name", "content"];

/// Formats a timestamp the way the backup format expects: `2024-01-01T00:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Opaque presentation metadata attached to a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    pub const COLOR: &'static str = "color";
    pub const IS_PINNED: &'static str = "isPinned";
    pub const CREATED_AT: &'static str = "createdAt";
    pub const UPDATED_AT: &'static str = "updatedAt";
    pub const ORDER: &'static str = "order";

    pub fn new() -> Self {
        Self::default()
    }

    /// Builds attributes from a raw JSON map, dropping reserved keys.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        for key in RESERVED_KEYS {
            map.remove(key);
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets an attribute. Reserved keys (`id`, `name`, `content`) are ignored.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return;
        }
        self.0.insert(key, value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn color(&self) -> Option<&str> {
        self.get(Self::COLOR).and_then(Value::as_str)
    }

    pub fn is_pinned(&self) -> bool {
        self.get(Self::IS_PINNED)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn order(&self) -> Option<i64> {
        self.get(Self::ORDER).and_then(Value::as_i64)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp(Self::CREATED_AT)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp(Self::UPDATED_AT)
    }

    pub fn set_timestamp(&mut self, key: &str, at: DateTime<Utc>) {
        self.set(key, iso_timestamp(at));
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        let raw = self.get(key)?.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub content: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Document {
    /// Drops the id, keeping everything else.
    pub fn into_new(self) -> NewDocument {
        NewDocument {
            name: self.name,
            content: self.content,
            attributes: self.attributes,
        }
    }
}

/// A document that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub name: String,
    pub content: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl NewDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.set(key, value);
        self
    }

    pub fn into_document(self, id: DocumentId) -> Document {
        Document {
            id,
            name: self.name,
            content: self.content,
            attributes: self.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_document_serializes_attributes_inline() {
        let doc = NewDocument::new("a.md", "# A")
            .with_attribute(Attributes::IS_PINNED, true)
            .with_attribute(Attributes::COLOR, "#3b82f6")
            .into_document(7);

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "a.md",
                "content": "# A",
                "isPinned": true,
                "color": "#3b82f6"
            })
        );
    }

    #[test]
    fn test_unknown_keys_survive_deserialization() {
        let doc: Document = serde_json::from_value(json!({
            "id": 1,
            "name": "n",
            "content": "c",
            "groupId": 4,
            "fontSize": "large"
        }))
        .unwrap();

        assert_eq!(doc.attributes.len(), 2);
        assert_eq!(doc.attributes.get("groupId"), Some(&json!(4)));
        assert_eq!(doc.attributes.get("fontSize"), Some(&json!("large")));
    }

    #[test]
    fn test_reserved_keys_are_not_attributes() {
        let mut attrs = Attributes::new();
        attrs.set("name", "sneaky");
        attrs.set("id", 3);
        assert!(attrs.is_empty());

        let mut map = Map::new();
        map.insert("content".into(), json!("x"));
        map.insert("order".into(), json!(2));
        let attrs = Attributes::from_map(map);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.order(), Some(2));
    }

    #[test]
    fn test_typed_accessors_are_lenient() {
        let mut attrs = Attributes::new();
        attrs.set(Attributes::IS_PINNED, "yes");
        attrs.set(Attributes::ORDER, "first");
        attrs.set(Attributes::CREATED_AT, 12);
        attrs.set(Attributes::COLOR, false);

        assert!(!attrs.is_pinned());
        assert_eq!(attrs.order(), None);
        assert_eq!(attrs.created_at(), None);
        assert_eq!(attrs.color(), None);
    }

    #[test]
    fn test_timestamps_use_millisecond_iso_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-01-01T00:00:00.000Z");

        let mut attrs = Attributes::new();
        attrs.set_timestamp(Attributes::UPDATED_AT, at);
        assert_eq!(attrs.updated_at(), Some(at));
    }

    #[test]
    fn test_into_new_strips_id_only() {
        let doc = NewDocument::new("x", "y")
            .with_attribute(Attributes::ORDER, 5)
            .into_document(42);
        let draft = doc.clone().into_new();
        assert_eq!(draft.name, "x");
        assert_eq!(draft.content, "y");
        assert_eq!(draft.attributes, doc.attributes);
    }
}
