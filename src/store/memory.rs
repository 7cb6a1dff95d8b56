//! In-memory [`DocumentStore`] used for tests and local runs.

use crate::error::Result;
use crate::store::{Document, DocumentStore, FieldValue};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

type StoreClock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// DashMap-backed document store with merge writes and server-timestamp
/// resolution.
///
/// The store carries its own clock so tests can skew "server time" away from
/// the local clock. The default clock is `Utc::now`.
#[derive(Clone)]
pub struct MemoryStore {
    documents: Arc<DashMap<(String, String), Document>>,
    clock: StoreClock,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    /// Create a store whose server-assigned timestamps come from `clock`.
    pub fn with_clock(clock: StoreClock) -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
            clock,
        }
    }

    /// Create a store whose server clock always reads `instant`.
    pub fn frozen_at(instant: DateTime<Utc>) -> Self {
        Self::with_clock(Arc::new(move || instant))
    }

    fn resolve_placeholders(&self, doc: &mut Document) {
        // One write resolves every placeholder to the same instant.
        resolve_map(doc.fields_mut(), (self.clock)());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_map(map: &mut BTreeMap<String, FieldValue>, now: DateTime<Utc>) {
    for value in map.values_mut() {
        match value {
            FieldValue::ServerTimestamp => *value = FieldValue::Timestamp(now),
            FieldValue::Map(nested) => resolve_map(nested, now),
            _ => {}
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        Ok(self
            .documents
            .get(&(collection.to_string(), id.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn set_merge(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        let mut fields = fields;
        self.resolve_placeholders(&mut fields);
        let key = (collection.to_string(), id.to_string());
        match self.documents.get_mut(&key) {
            Some(mut existing) => existing.merge_from(fields),
            None => {
                self.documents.insert(key, fields);
            }
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Document)>> {
        Ok(self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == collection)
            .map(|entry| (entry.key().1.clone(), entry.value().clone()))
            .collect())
    }
}
