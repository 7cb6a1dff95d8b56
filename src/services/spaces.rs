//! Space fetch lifecycle and operator-facing writes.
//!
//! [`SpaceSource`] owns the fetch/derivation lifecycle for one space and
//! publishes the result as a [`WorkspaceState`] through a watch channel.
//! Exactly one source exists per provider scope (see [`crate::context`]),
//! which is what keeps independent consumers from issuing duplicate fetches
//! or diverging on what they display.

use crate::error::{Error, Result};
use crate::models::spaces::{NewSpace, Space, UpdateSpace};
use crate::queries::spaces as queries;
use crate::state::WorkspaceState;
use crate::store::{Document, DocumentStore};
use crate::validation::validate_space;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use uuid::Uuid;

pub struct SpaceSource {
    store: Arc<dyn DocumentStore>,
    collection: String,
    space_id: String,
    state: watch::Sender<Arc<WorkspaceState>>,
    /// Held across a fetch; concurrent refreshes wait on it instead of
    /// issuing a second store read.
    fetch_gate: Mutex<()>,
}

impl SpaceSource {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
        space_id: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(Arc::new(WorkspaceState::Idle));
        Self {
            store,
            collection: collection.into(),
            space_id: space_id.into(),
            state,
            fetch_gate: Mutex::new(()),
        }
    }

    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    /// The latest published state, by reference.
    pub fn current(&self) -> Arc<WorkspaceState> {
        self.state.borrow().clone()
    }

    /// Change notifications for the published state.
    pub fn subscribe(&self) -> watch::Receiver<Arc<WorkspaceState>> {
        self.state.subscribe()
    }

    /// Fetches the space and publishes `Ready` or `Error`.
    ///
    /// Single-flight: a call arriving while a fetch is in flight does not
    /// start a second one; it waits for the in-flight fetch and returns its
    /// result.
    pub async fn refresh(&self) -> Arc<WorkspaceState> {
        let gate = match self.fetch_gate.try_lock() {
            Ok(gate) => gate,
            Err(_) => {
                // A fetch is already in flight; wait for it to publish.
                let _finished = self.fetch_gate.lock().await;
                return self.current();
            }
        };

        self.state.send_replace(Arc::new(WorkspaceState::Loading));
        tracing::debug!(space_id = %self.space_id, "fetching workspace state");

        let next = match queries::get_space(self.store.as_ref(), &self.collection, &self.space_id)
            .await
            .and_then(|space| {
                validate_space(&space)?;
                Ok(space)
            }) {
            Ok(space) => WorkspaceState::Ready(Arc::new(space)),
            Err(err) => {
                tracing::debug!(space_id = %self.space_id, error = %err, "workspace fetch failed");
                WorkspaceState::Error {
                    message: err.to_string(),
                }
            }
        };

        let next = Arc::new(next);
        self.state.send_replace(next.clone());
        drop(gate);
        next
    }
}

/// Publishes a new space: validate, write with server-assigned id and
/// timestamps, read back the stored record.
pub async fn publish_space(
    store: &dyn DocumentStore,
    collection: &str,
    new_space: NewSpace,
) -> Result<Space> {
    let id = Uuid::now_v7().to_string();
    let candidate = space_from_new(&id, &new_space);
    validate_space(&candidate)?;

    let fields = Document::encode(&new_space)?;
    queries::create_space_document(store, collection, &id, fields).await?;
    queries::get_space(store, collection, &id).await
}

/// Applies a partial edit: validate the merged result, merge-write only the
/// provided fields, advance `updatedAt` on the server clock, read back.
pub async fn change_space(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    update: UpdateSpace,
) -> Result<Space> {
    let existing = queries::get_space(store, collection, id).await?;
    let merged = update.apply_to(&existing);
    validate_space(&merged)?;

    let fields = Document::encode(&update)?;
    if fields.is_empty() {
        return Err(Error::Validation("Update contains no fields".to_string()));
    }
    queries::update_space_document(store, collection, id, fields).await?;
    queries::get_space(store, collection, id).await
}

fn space_from_new(id: &str, new_space: &NewSpace) -> Space {
    Space {
        id: id.to_string(),
        name: new_space.name.clone(),
        address: new_space.address.clone(),
        geo_address: new_space.geo_address.clone(),
        working_days: new_space.working_days.clone(),
        working_time: new_space.working_time,
        capacity: new_space.capacity,
        min_duration: new_space.min_duration,
        max_duration: new_space.max_duration,
        min_charge: new_space.min_charge,
        max_charge: new_space.max_charge,
        images: new_space.images.clone(),
        contact_line: new_space.contact_line.clone(),
        features: new_space.features.clone(),
        space_type: new_space.space_type.clone(),
        description: new_space.description.clone(),
        visible: new_space.visible,
        created_at: None,
        updated_at: None,
    }
}
