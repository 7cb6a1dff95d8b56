//! Remote document-store boundary.
//!
//! The booking product persists everything in a document database that the
//! client treats as opaque: read a document, merge-write a partial document,
//! list a collection. The one special primitive is the server-assigned
//! timestamp, written as a placeholder and resolved by the store itself so
//! the caller's local clock never enters persisted data.

pub mod memory;

use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;

pub use memory::MemoryStore;

/// A single field value inside a document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    Text(String),
    /// A concrete instant assigned by the store.
    Timestamp(DateTime<Utc>),
    /// Write-time placeholder the store resolves to its own current instant.
    /// A reader that races the resolution may still observe it.
    ServerTimestamp,
    Array(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

/// A document: a named, unordered set of field values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> &mut Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub(crate) fn fields_mut(&mut self) -> &mut BTreeMap<String, FieldValue> {
        &mut self.fields
    }

    /// Merge `patch` into this document. Fields absent from the patch are
    /// preserved; map-valued fields merge recursively; everything else is
    /// replaced.
    pub fn merge_from(&mut self, patch: Document) {
        for (name, value) in patch.fields {
            match (self.fields.get_mut(&name), value) {
                (Some(FieldValue::Map(existing)), FieldValue::Map(incoming)) => {
                    merge_maps(existing, incoming);
                }
                (_, value) => {
                    self.fields.insert(name, value);
                }
            }
        }
    }

    /// Encode a serializable model into a document.
    pub fn encode<T: Serialize>(value: &T) -> Result<Document> {
        let json = serde_json::to_value(value)?;
        match json {
            serde_json::Value::Object(map) => Ok(Document {
                fields: map
                    .into_iter()
                    .map(|(name, value)| (name, field_from_json(value)))
                    .collect(),
            }),
            other => Err(Error::Internal(format!(
                "cannot encode non-object value as document: {}",
                other
            ))),
        }
    }

    /// Decode the document into a deserializable model. Pending
    /// server-timestamp placeholders decode as null.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), field_to_json(value)))
            .collect();
        Ok(serde_json::from_value(serde_json::Value::Object(map))?)
    }
}

fn merge_maps(existing: &mut BTreeMap<String, FieldValue>, incoming: BTreeMap<String, FieldValue>) {
    for (name, value) in incoming {
        match (existing.get_mut(&name), value) {
            (Some(FieldValue::Map(nested)), FieldValue::Map(patch)) => merge_maps(nested, patch),
            (_, value) => {
                existing.insert(name, value);
            }
        }
    }
}

fn field_from_json(value: serde_json::Value) -> FieldValue {
    match value {
        serde_json::Value::Null => FieldValue::Null,
        serde_json::Value::Bool(b) => FieldValue::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Integer(i),
            None => FieldValue::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => FieldValue::Text(s),
        serde_json::Value::Array(items) => {
            FieldValue::Array(items.into_iter().map(field_from_json).collect())
        }
        serde_json::Value::Object(map) => FieldValue::Map(
            map.into_iter()
                .map(|(name, value)| (name, field_from_json(value)))
                .collect(),
        ),
    }
}

fn field_to_json(value: &FieldValue) -> serde_json::Value {
    match value {
        FieldValue::Null | FieldValue::ServerTimestamp => serde_json::Value::Null,
        FieldValue::Bool(b) => serde_json::Value::Bool(*b),
        FieldValue::Integer(i) => serde_json::Value::from(*i),
        FieldValue::Double(d) => {
            serde_json::Number::from_f64(*d).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
        FieldValue::Text(s) => serde_json::Value::String(s.clone()),
        FieldValue::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
        FieldValue::Array(items) => {
            serde_json::Value::Array(items.iter().map(field_to_json).collect())
        }
        FieldValue::Map(map) => serde_json::Value::Object(
            map.iter()
                .map(|(name, value)| (name.clone(), field_to_json(value)))
                .collect(),
        ),
    }
}

/// The remote store boundary.
///
/// Implementations must honor merge semantics in [`set_merge`]: a partial
/// document never erases fields it does not name, and every
/// [`FieldValue::ServerTimestamp`] placeholder resolves to the store's own
/// current instant, not the caller's.
///
/// [`set_merge`]: DocumentStore::set_merge
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a single document. `Ok(None)` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Upsert with merge semantics.
    async fn set_merge(&self, collection: &str, id: &str, fields: Document) -> Result<()>;

    /// List all documents of a collection as `(id, document)` pairs.
    async fn list(&self, collection: &str) -> Result<Vec<(String, Document)>>;
}
