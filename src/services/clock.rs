//! Server-authoritative clock synchronization.
//!
//! Device clocks cannot be trusted for business-hour decisions (is a space
//! open, is a booking window still valid): a user can set their clock to
//! anything. Instead of a dedicated time endpoint, the clock round-trips
//! through the document store: merge-write a marker carrying the
//! server-timestamp placeholder, read the marker back, and use the instant
//! the store resolved.
//!
//! The utility is infallible by contract. Any failure along the round trip
//! degrades to the local clock, because an approximately-correct time in the
//! UI beats an error. Each degradation is logged so silent fallback stays
//! debuggable.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::{Document, DocumentStore, FieldValue};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// The field the sync marker stores its resolved instant under.
const SYNC_FIELD: &str = "ts";

pub struct RemoteClock {
    store: Arc<dyn DocumentStore>,
    collection: String,
    document: String,
    timeout: Duration,
}

impl RemoteClock {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        Self {
            store,
            collection: config.store.meta_collection.clone(),
            document: config.clock.sync_document.clone(),
            timeout: Duration::from_millis(config.clock.sync_timeout_ms),
        }
    }

    /// Returns the current instant as agreed with the remote store.
    ///
    /// Never fails: on any store error, timeout, or unusable marker value
    /// the local clock is returned instead. One call is one remote write
    /// plus one remote read, so call it once per coarse-grained check, not
    /// in a loop.
    pub async fn fetch_server_time(&self) -> DateTime<Utc> {
        match tokio::time::timeout(self.timeout, self.round_trip()).await {
            Ok(Ok(instant)) => instant,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "server clock unavailable, using local clock");
                Utc::now()
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "server clock round trip timed out, using local clock"
                );
                Utc::now()
            }
        }
    }

    async fn round_trip(&self) -> Result<DateTime<Utc>> {
        let mut marker = Document::new();
        marker.insert(SYNC_FIELD, FieldValue::ServerTimestamp);
        self.store
            .set_merge(&self.collection, &self.document, marker)
            .await?;

        // Issued strictly after the write completed, so the marker written
        // above is the one observed.
        let doc = self
            .store
            .get(&self.collection, &self.document)
            .await?
            .ok_or_else(|| Error::ClockUnavailable("sync marker missing after write".to_string()))?;

        match doc.get(SYNC_FIELD) {
            Some(FieldValue::Timestamp(instant)) => Ok(*instant),
            Some(FieldValue::ServerTimestamp) => Err(Error::ClockUnavailable(
                "sync marker still pending resolution".to_string(),
            )),
            Some(other) => Err(Error::ClockUnavailable(format!(
                "sync marker holds a non-timestamp value: {:?}",
                other
            ))),
            None => Err(Error::ClockUnavailable(
                "sync marker has no timestamp field".to_string(),
            )),
        }
    }
}
