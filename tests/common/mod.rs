//! Shared test helpers and store doubles.

pub mod helpers;
pub mod stores;

#[allow(unused_imports)]
pub use helpers::{sample_new_space, seeded_store, test_config};
#[allow(unused_imports)]
pub use stores::{CountingStore, FailingStore, ManualClock, PresetStore, SlowStore};
