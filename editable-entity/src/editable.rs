//! The editable entity: overlay + lifecycle + ports.
//!
//! State lives behind a `tokio::sync::RwLock` that is never held across a
//! store call, so reads made while a save is in flight see `working = true`.
//! Each mutator publishes a fresh [`EntitySnapshot`] before it returns.

use editable_overlay::{Overlay, merge};
use editable_types::{EntityRef, FieldPath, Resource};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::{debug, error, info};

use crate::config::EditorConfig;
use crate::error::{EditError, EditResult};
use crate::lifecycle::{EntityStatus, Lifecycle};
use crate::listener::{EntityListener, NoopListener};
use crate::snapshot::EntitySnapshot;
use crate::store::ResourceStore;

/// How a call to [`EditableEntity::save`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing was pending; the store was not called.
    Unchanged,
    /// The store accepted the payload and returned this identity, if any.
    Saved(Option<EntityRef>),
    /// The store failed; the pending edits are kept and `status().error` is set.
    Failed,
}

/// How a call to [`EditableEntity::remove`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(EntityRef),
    /// The store failed; `status().error` is set.
    Failed,
}

#[derive(Debug, Default)]
struct EditorState {
    base: Option<Arc<Resource>>,
    overlay: Overlay,
    lifecycle: Lifecycle,
}

impl EditorState {
    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            base: self.base.clone(),
            overlay: self.overlay.clone(),
            status: self.lifecycle.status(),
        }
    }

    fn base_document(&self) -> Option<&Value> {
        self.base.as_deref().map(Resource::document)
    }
}

/// A resource being edited.
///
/// ```text
/// change/reset ──► overlay ──► get_data / get_all_data
///                     │
///            save ────┴──► build_payload ──► ResourceStore::create|update
///            remove ─────────────────────► ResourceStore::delete
/// ```
pub struct EditableEntity {
    state: RwLock<EditorState>,
    store: Arc<dyn ResourceStore>,
    listener: Arc<dyn EntityListener>,
    config: EditorConfig,
    snapshots: watch::Sender<EntitySnapshot>,
}

impl EditableEntity {
    /// Creates an editor over `base`. Pass `None` to create a new resource.
    pub fn new(base: Option<Resource>, store: Arc<dyn ResourceStore>) -> Self {
        let state = EditorState {
            base: base.map(Arc::new),
            ..EditorState::default()
        };
        let (snapshots, _) = watch::channel(state.snapshot());
        Self {
            state: RwLock::new(state),
            store,
            listener: Arc::new(NoopListener),
            config: EditorConfig::default(),
            snapshots,
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn EntityListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ── Observation ──────────────────────────────────────────────

    /// Receives a snapshot after every committed state change.
    pub fn subscribe(&self) -> watch::Receiver<EntitySnapshot> {
        self.snapshots.subscribe()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> EntitySnapshot {
        self.snapshots.borrow().clone()
    }

    fn publish(&self, state: &EditorState) {
        self.snapshots.send_replace(state.snapshot());
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Current value at `path`: the pending edit, else the base value, else
    /// `default`.
    pub async fn get_data(&self, path: &FieldPath, default: Value) -> Value {
        let state = self.state.read().await;
        merge::read(&state.overlay, state.base_document(), path, default)
    }

    /// The base with every pending edit applied. `None` if there is neither.
    pub async fn get_all_data(&self) -> Option<Value> {
        let state = self.state.read().await;
        merge::read_all(&state.overlay, state.base_document())
    }

    pub async fn base(&self) -> Option<Arc<Resource>> {
        self.state.read().await.base.clone()
    }

    pub async fn overlay(&self) -> Overlay {
        self.state.read().await.overlay.clone()
    }

    pub async fn status(&self) -> EntityStatus {
        self.state.read().await.lifecycle.status()
    }

    pub async fn has_changes(&self) -> bool {
        !self.state.read().await.overlay.is_empty()
    }

    pub async fn changed_paths(&self) -> Vec<FieldPath> {
        self.state.read().await.overlay.paths().cloned().collect()
    }

    // ── Overlay mutators ─────────────────────────────────────────

    /// Records a pending edit without touching the base.
    pub async fn change(&self, path: FieldPath, value: Value) {
        let mut state = self.state.write().await;
        debug!("Changed {}", path);
        state.overlay.change(path, value);
        self.publish(&state);
    }

    /// Drops the pending edit at `path`, if any.
    pub async fn reset(&self, path: &FieldPath) {
        let mut state = self.state.write().await;
        if state.overlay.reset(path).is_some() {
            debug!("Reset {}", path);
        }
        self.publish(&state);
    }

    /// Drops every pending edit.
    pub async fn reset_all(&self) {
        let mut state = self.state.write().await;
        state.overlay.reset_all();
        self.publish(&state);
    }

    /// Swaps in a newer base (e.g. after the owning store refreshed).
    /// Pending edits and lifecycle state are kept.
    pub async fn replace_base(&self, base: Option<Resource>) {
        let mut state = self.state.write().await;
        state.base = base.map(Arc::new);
        self.publish(&state);
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Submits the pending edits.
    ///
    /// Creates a resource when there is no base, otherwise updates it. Store
    /// failures are logged and reported through `status().error`; only
    /// lifecycle misuse (a save or remove already in flight) is an `Err`.
    pub async fn save(&self) -> EditResult<SaveOutcome> {
        let (is_new, payload) = {
            let mut guard = self.state.write().await;
            let state = &mut *guard;

            if state.overlay.is_empty() {
                state.lifecycle.settle()?;
                self.publish(state);
                debug!("Nothing to save");
                return Ok(SaveOutcome::Unchanged);
            }

            let is_new = state.base.is_none();
            let paths: Vec<FieldPath> = state.overlay.paths().cloned().collect();
            state.lifecycle.begin_save(is_new, paths)?;

            let initial = match state.base.as_deref() {
                Some(base) => base.entity_ref().to_document(),
                None => Value::Object(Map::new()),
            };
            let payload = merge::build_payload(
                &state.overlay,
                initial,
                state.base_document(),
                self.config.complete_complex_fields,
            );
            self.publish(state);
            debug!(
                "{} resource with {} changed field(s)",
                if is_new { "Creating" } else { "Updating" },
                state.overlay.len()
            );
            (is_new, payload)
        };

        let result = if is_new {
            self.store.create(payload).await
        } else {
            self.store.update(payload).await
        };

        match result {
            Ok(saved) => {
                if let Some(entity) = &saved {
                    self.listener.on_save(entity);
                    if is_new {
                        self.listener.on_create(entity);
                    }
                    info!("Saved {}", entity);
                }
                let mut state = self.state.write().await;
                state.overlay.reset_all();
                state.lifecycle.complete()?;
                self.publish(&state);
                Ok(SaveOutcome::Saved(saved))
            }
            Err(e) => {
                error!("Failed to save resource: {}", e);
                let mut state = self.state.write().await;
                state
                    .lifecycle
                    .fail(self.config.save_error_message.clone())?;
                self.publish(&state);
                Ok(SaveOutcome::Failed)
            }
        }
    }

    /// Deletes the base resource.
    ///
    /// Returns [`EditError::NoEntity`] before doing anything when there is no
    /// base. Store failures are handled like in [`save`](Self::save).
    pub async fn remove(&self) -> EditResult<RemoveOutcome> {
        let target = {
            let mut state = self.state.write().await;
            let target = state
                .base
                .as_deref()
                .map(|base| base.entity_ref().clone())
                .ok_or(EditError::NoEntity)?;
            state.lifecycle.begin_remove()?;
            self.publish(&state);
            target
        };

        debug!("Removing {}", target);

        match self.store.delete(&target).await {
            Ok(()) => {
                self.listener.on_remove(&target);
                info!("Removed {}", target);
                let mut state = self.state.write().await;
                state.overlay.reset_all();
                state.lifecycle.complete()?;
                self.publish(&state);
                Ok(RemoveOutcome::Removed(target))
            }
            Err(e) => {
                error!("Failed to remove {}: {}", target, e);
                let mut state = self.state.write().await;
                state
                    .lifecycle
                    .fail(self.config.remove_error_message.clone())?;
                self.publish(&state);
                Ok(RemoveOutcome::Failed)
            }
        }
    }
}

impl std::fmt::Debug for EditableEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditableEntity")
            .field("config", &self.config)
            .field("snapshot", &*self.snapshots.borrow())
            .finish_non_exhaustive()
    }
}
