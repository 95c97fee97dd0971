//! Edit a remote resource through a local change overlay.
//!
//! [`EditableEntity`] wraps a base [`Resource`] (or nothing, when creating)
//! and keeps every edit in an [`Overlay`] until [`EditableEntity::save`]
//! submits them through a [`ResourceStore`].
//!
//! # Architecture
//!
//! - **Overlay & merge**: pending edits and the pure fold that turns them into
//!   a payload (`editable-overlay`)
//! - **Lifecycle**: a guarded state machine (Idle → Saving/Removing →
//!   Idle/Failed) that allows one save or remove in flight at a time
//! - **Ports**: [`ResourceStore`] persists, [`EntityListener`] hears about
//!   successful creates, saves and removes
//! - **Snapshots**: every committed state change is published on a
//!   `tokio::sync::watch` channel as an [`EntitySnapshot`]
//!
//! # Example
//!
//! ```
//! use editable_entity::mock::MemoryStore;
//! use editable_entity::{EditableEntity, FieldPath, Resource, SaveOutcome};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let base = Resource::new("1", "node--article").with_attribute("title", json!("Old"));
//! let store = Arc::new(MemoryStore::with_resources([base.clone()]));
//! let entity = EditableEntity::new(Some(base), store);
//!
//! let title = FieldPath::parse("attributes.title").unwrap();
//! entity.change(title.clone(), json!("New")).await;
//! assert_eq!(entity.get_data(&title, json!(null)).await, json!("New"));
//!
//! let outcome = entity.save().await.unwrap();
//! assert!(matches!(outcome, SaveOutcome::Saved(Some(_))));
//! assert!(!entity.has_changes().await);
//! # });
//! ```

mod config;
mod editable;
mod error;
mod lifecycle;
mod listener;
pub mod mock;
mod snapshot;
mod store;

pub use config::{DEFAULT_REMOVE_ERROR, DEFAULT_SAVE_ERROR, EditorConfig};
pub use editable::{EditableEntity, RemoveOutcome, SaveOutcome};
pub use error::{EditError, EditResult};
pub use lifecycle::{EntityStatus, Lifecycle, LifecycleEvent, Phase};
pub use listener::{Callbacks, EntityListener, NoopListener};
pub use snapshot::EntitySnapshot;
pub use store::{ResourceStore, StoreError, StoreResult};

pub use editable_overlay::{Overlay, merge};
pub use editable_types::{EntityRef, FieldPath, Resource};
