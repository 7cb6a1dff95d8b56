//! DocumentStore doubles for failure injection and call counting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deskhive::error::{Error, Result};
use deskhive::store::{Document, DocumentStore, MemoryStore};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Wraps a [`MemoryStore`] and counts reads/writes. An optional delay before
/// each read keeps a fetch in flight long enough for another caller to race
/// it.
pub struct CountingStore {
    inner: MemoryStore,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
    get_delay: Option<Duration>,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
            get_delay: None,
        }
    }

    pub fn with_get_delay(inner: MemoryStore, delay: Duration) -> Self {
        Self {
            get_delay: Some(delay),
            ..Self::new(inner)
        }
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.get_delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.get(collection, id).await
    }

    async fn set_merge(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set_merge(collection, id, fields).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Document)>> {
        self.inner.list(collection).await
    }
}

/// Fails writes and/or reads with permission-style store errors.
pub struct FailingStore {
    pub fail_writes: bool,
    pub fail_reads: bool,
    inner: MemoryStore,
}

impl FailingStore {
    pub fn new(fail_writes: bool, fail_reads: bool) -> Self {
        Self {
            fail_writes,
            fail_reads,
            inner: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        if self.fail_reads {
            return Err(Error::Store("permission denied: read".to_string()));
        }
        self.inner.get(collection, id).await
    }

    async fn set_merge(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Store("permission denied: write".to_string()));
        }
        self.inner.set_merge(collection, id, fields).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Document)>> {
        if self.fail_reads {
            return Err(Error::Store("permission denied: list".to_string()));
        }
        self.inner.list(collection).await
    }
}

/// Accepts every write but always serves the preset document (or nothing),
/// simulating a reader racing the server-side timestamp resolution or a
/// corrupted marker.
pub struct PresetStore {
    doc: Option<Document>,
}

impl PresetStore {
    pub fn new(doc: Option<Document>) -> Self {
        Self { doc }
    }
}

#[async_trait]
impl DocumentStore for PresetStore {
    async fn get(&self, _collection: &str, _id: &str) -> Result<Option<Document>> {
        Ok(self.doc.clone())
    }

    async fn set_merge(&self, _collection: &str, _id: &str, _fields: Document) -> Result<()> {
        Ok(())
    }

    async fn list(&self, _collection: &str) -> Result<Vec<(String, Document)>> {
        Ok(Vec::new())
    }
}

/// Stalls every operation, for timeout behavior.
pub struct SlowStore {
    delay: Duration,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl DocumentStore for SlowStore {
    async fn get(&self, _collection: &str, _id: &str) -> Result<Option<Document>> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn set_merge(&self, _collection: &str, _id: &str, _fields: Document) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn list(&self, _collection: &str) -> Result<Vec<(String, Document)>> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }
}

/// A settable clock for driving [`MemoryStore::with_clock`] in tests.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap() = instant;
    }

    pub fn store(&self) -> MemoryStore {
        let now = self.now.clone();
        MemoryStore::with_clock(Arc::new(move || *now.lock().unwrap()))
    }
}
