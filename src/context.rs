//! Scoped workspace context.
//!
//! A [`WorkspaceProvider`] owns exactly one [`SpaceSource`] and makes it
//! reachable from everything running inside [`WorkspaceProvider::provide`]
//! via [`use_shared_workspace`]. Every consumer in the scope resolves to the
//! same source, so they all read the same `Arc<WorkspaceState>` and observe
//! replacements simultaneously.
//!
//! The context is task-local, not process-global: independent providers can
//! coexist (two views, two tests) without seeing each other, and a
//! provider's state lives exactly as long as the provider itself.

use crate::config::Config;
use crate::services::spaces::SpaceSource;
use crate::state::WorkspaceState;
use crate::store::DocumentStore;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

tokio::task_local! {
    static CURRENT_WORKSPACE: Arc<SpaceSource>;
}

/// Owns the single state source of a workspace scope.
pub struct WorkspaceProvider {
    source: Arc<SpaceSource>,
}

impl WorkspaceProvider {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config, space_id: impl Into<String>) -> Self {
        Self {
            source: Arc::new(SpaceSource::new(
                store,
                config.store.spaces_collection.clone(),
                space_id,
            )),
        }
    }

    /// Runs `fut` with this provider's workspace context in scope.
    /// Everything awaited inside may call [`use_shared_workspace`].
    pub async fn provide<F: Future>(&self, fut: F) -> F::Output {
        CURRENT_WORKSPACE.scope(self.source.clone(), fut).await
    }

    /// A handle bound to this provider directly, for callers that hold the
    /// provider itself rather than run inside its scope.
    pub fn handle(&self) -> SharedWorkspace {
        SharedWorkspace {
            source: self.source.clone(),
        }
    }
}

/// A consumer's view of the scope's shared workspace state.
///
/// Cloning the handle never copies state: all handles of one scope point at
/// the same source and return pointer-equal `Arc<WorkspaceState>` values.
#[derive(Clone)]
pub struct SharedWorkspace {
    source: Arc<SpaceSource>,
}

impl SharedWorkspace {
    pub fn space_id(&self) -> &str {
        self.source.space_id()
    }

    /// The latest state, by reference.
    pub fn current(&self) -> Arc<WorkspaceState> {
        self.source.current()
    }

    /// Change notifications; `borrow()` always yields the latest state.
    pub fn subscribe(&self) -> watch::Receiver<Arc<WorkspaceState>> {
        self.source.subscribe()
    }

    /// Triggers (or joins) a refresh. See [`SpaceSource::refresh`].
    pub async fn refresh(&self) -> Arc<WorkspaceState> {
        self.source.refresh().await
    }
}

/// Looks up the shared workspace of the enclosing provider scope.
///
/// # Panics
/// Panics when called outside [`WorkspaceProvider::provide`]. That is a
/// wiring defect in the caller, and surfacing it immediately beats handing
/// out a detached default that fails later somewhere deep in a consumer.
pub fn use_shared_workspace() -> SharedWorkspace {
    try_use_shared_workspace().unwrap_or_else(|| {
        panic!(
            "use_shared_workspace() called outside a WorkspaceProvider scope; \
             wrap the calling future in WorkspaceProvider::provide"
        )
    })
}

/// Non-panicking lookup, for callers that genuinely probe for a scope.
pub fn try_use_shared_workspace() -> Option<SharedWorkspace> {
    CURRENT_WORKSPACE
        .try_with(|source| SharedWorkspace {
            source: source.clone(),
        })
        .ok()
}
