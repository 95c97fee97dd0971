//! In-memory collaborators for tests.
//!
//! [`MemoryStore`] keeps resources in a map, records every call, and can be
//! told to fail, to return no identity, or to hold calls until released.
//! [`RecordingListener`] records listener callbacks in order.

use async_trait::async_trait;
use editable_types::{EntityRef, Resource};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Notify, Semaphore};
use uuid::Uuid;

use crate::listener::EntityListener;
use crate::store::{ResourceStore, StoreError, StoreResult};

/// A call received by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Create(Value),
    Update(Value),
    Delete(EntityRef),
}

/// A `HashMap`-backed [`ResourceStore`].
///
/// Created resources get a UUID v4 id; their `type` must be part of the
/// payload. Updates deep-merge the payload into the stored document.
#[derive(Debug, Default)]
pub struct MemoryStore {
    resources: Mutex<HashMap<EntityRef, Value>>,
    calls: Mutex<Vec<StoreCall>>,
    failing: AtomicBool,
    silent: AtomicBool,
    gate: Option<Semaphore>,
    entered: Notify,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `resources`.
    pub fn with_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        let store = Self::new();
        for resource in resources {
            store.insert(resource);
        }
        store
    }

    /// A store whose calls block until [`release`](Self::release) is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    pub fn insert(&self, resource: Resource) {
        let key = resource.entity_ref().clone();
        self.resources
            .lock()
            .unwrap()
            .insert(key, resource.into_document());
    }

    pub fn get(&self, entity: &EntityRef) -> Option<Value> {
        self.resources.lock().unwrap().get(entity).cloned()
    }

    pub fn contains(&self, entity: &EntityRef) -> bool {
        self.resources.lock().unwrap().contains_key(entity)
    }

    pub fn len(&self) -> usize {
        self.resources.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Makes every subsequent call fail with a 500 rejection.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Makes create/update succeed without returning an identity.
    pub fn set_silent(&self, silent: bool) {
        self.silent.store(silent, Ordering::SeqCst);
    }

    /// Lets `n` gated calls proceed.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Resolves once a call has been recorded (and, if gated, is waiting).
    pub async fn wait_for_call(&self) {
        self.entered.notified().await;
    }

    async fn enter(&self, call: StoreCall) -> StoreResult<()> {
        self.calls.lock().unwrap().push(call);
        self.entered.notify_one();
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| StoreError::Other(e.to_string()))?
                .forget();
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                status: 500,
                message: "injected failure".into(),
            });
        }
        Ok(())
    }

    fn identity_of(&self, entity: EntityRef) -> Option<EntityRef> {
        (!self.silent.load(Ordering::SeqCst)).then_some(entity)
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn create(&self, payload: Value) -> StoreResult<Option<EntityRef>> {
        self.enter(StoreCall::Create(payload.clone())).await?;

        let Some(entity_type) = payload.get("type").and_then(Value::as_str) else {
            return Err(StoreError::Rejected {
                status: 422,
                message: "missing resource type".into(),
            });
        };
        let entity = EntityRef::new(Uuid::new_v4().to_string(), entity_type);

        let mut document = payload;
        deep_merge(&mut document, entity.to_document());
        self.resources
            .lock()
            .unwrap()
            .insert(entity.clone(), document);
        Ok(self.identity_of(entity))
    }

    async fn update(&self, payload: Value) -> StoreResult<Option<EntityRef>> {
        self.enter(StoreCall::Update(payload.clone())).await?;

        let entity: EntityRef = serde_json::from_value(payload.clone())?;
        let mut resources = self.resources.lock().unwrap();
        let Some(stored) = resources.get_mut(&entity) else {
            return Err(StoreError::NotFound(entity));
        };
        deep_merge(stored, payload);
        drop(resources);
        Ok(self.identity_of(entity))
    }

    async fn delete(&self, target: &EntityRef) -> StoreResult<()> {
        self.enter(StoreCall::Delete(target.clone())).await?;

        match self.resources.lock().unwrap().remove(target) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(target.clone())),
        }
    }
}

/// Recursively merges `patch` into `target`; non-object values replace.
fn deep_merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                deep_merge(
                    target.entry(key).or_insert(Value::Object(Map::new())),
                    value,
                );
            }
        }
        (target, patch) => *target = patch,
    }
}

/// A listener callback, as seen by [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    Created(EntityRef),
    Saved(EntityRef),
    Removed(EntityRef),
}

/// Records every callback it receives.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<ListenerEvent>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ListenerEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: ListenerEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl EntityListener for RecordingListener {
    fn on_create(&self, entity: &EntityRef) {
        self.record(ListenerEvent::Created(entity.clone()));
    }

    fn on_save(&self, entity: &EntityRef) {
        self.record(ListenerEvent::Saved(entity.clone()));
    }

    fn on_remove(&self, entity: &EntityRef) {
        self.record(ListenerEvent::Removed(entity.clone()));
    }
}
