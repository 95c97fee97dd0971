//! Shared test helpers for editable-entity tests.

#![allow(dead_code)]

use editable_entity::mock::{MemoryStore, RecordingListener};
use editable_entity::{EditableEntity, FieldPath, Resource};
use serde_json::json;
use std::sync::Arc;

/// Installs a `tracing` subscriber honouring `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn path(s: &str) -> FieldPath {
    FieldPath::parse(s).unwrap()
}

/// A profile with a complex `addr` attribute.
pub fn profile() -> Resource {
    Resource::new("p1", "profile")
        .with_attribute("name", json!("Ada"))
        .with_attribute("addr", json!({"city": "A", "zip": "1"}))
        .with_relationship("owner", json!({"data": {"id": "u1", "type": "user"}}))
}

pub struct Harness {
    pub entity: Arc<EditableEntity>,
    pub store: Arc<MemoryStore>,
    pub listener: Arc<RecordingListener>,
}

fn harness(base: Option<Resource>, store: MemoryStore) -> Harness {
    init_tracing();
    let store = Arc::new(store);
    let listener = Arc::new(RecordingListener::new());
    let entity = EditableEntity::new(base, store.clone()).with_listener(listener.clone());
    Harness {
        entity: Arc::new(entity),
        store,
        listener,
    }
}

/// Editing an existing profile that the store already knows.
pub fn existing() -> Harness {
    harness(Some(profile()), MemoryStore::with_resources([profile()]))
}

/// Editing a resource that does not exist yet.
pub fn creating() -> Harness {
    harness(None, MemoryStore::new())
}

/// Existing profile, but store calls block until released.
pub fn gated() -> Harness {
    let store = MemoryStore::gated();
    store.insert(profile());
    harness(Some(profile()), store)
}
