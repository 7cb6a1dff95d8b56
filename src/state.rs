use crate::models::spaces::Space;
use std::sync::Arc;

/// Fetch status and result for the workspace a provider scope is looking at.
///
/// Shared by replacement: every transition publishes a fresh value, never a
/// field edit, so a consumer holding a reference can never observe a
/// half-updated record. Consumers match exhaustively instead of probing an
/// untyped container.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceState {
    /// No fetch has been triggered yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The space was fetched and passed validation.
    Ready(Arc<Space>),
    /// The fetch (or validation) failed; the consumer decides about retry.
    Error { message: String },
}

impl WorkspaceState {
    pub fn status(&self) -> &'static str {
        match self {
            WorkspaceState::Idle => "idle",
            WorkspaceState::Loading => "loading",
            WorkspaceState::Ready(_) => "ready",
            WorkspaceState::Error { .. } => "error",
        }
    }

    /// The fetched space, when ready.
    pub fn space(&self) -> Option<&Arc<Space>> {
        match self {
            WorkspaceState::Ready(space) => Some(space),
            _ => None,
        }
    }
}
