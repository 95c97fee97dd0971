mod common;

use common::{creating, existing, path};
use editable_entity::mock::MemoryStore;
use editable_entity::{
    Callbacks, DEFAULT_REMOVE_ERROR, DEFAULT_SAVE_ERROR, EditableEntity, EditorConfig,
    EntityListener, EntityRef, NoopListener, SaveOutcome,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};

// ── Callbacks ────────────────────────────────────────────────────

#[test]
fn callbacks_dispatch_to_registered_closures() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let callbacks = Callbacks::new().on_remove(move |entity| {
        log.lock().unwrap().push(format!("removed {entity}"));
    });

    let entity = EntityRef::new("1", "note");
    EntityListener::on_save(&callbacks, &entity);
    EntityListener::on_create(&callbacks, &entity);
    EntityListener::on_remove(&callbacks, &entity);

    assert_eq!(*seen.lock().unwrap(), vec!["removed note:1".to_string()]);
}

#[test]
fn callbacks_debug_shows_registration() {
    let callbacks = Callbacks::new().on_save(|_| {});
    assert_eq!(
        format!("{callbacks:?}"),
        "Callbacks { on_create: false, on_save: true, on_remove: false }"
    );
}

#[test]
fn noop_listener_accepts_everything() {
    let entity = EntityRef::new("1", "note");
    NoopListener.on_create(&entity);
    NoopListener.on_save(&entity);
    NoopListener.on_remove(&entity);
}

#[tokio::test]
async fn callbacks_fire_from_entity_create() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let (saves, creates) = (order.clone(), order.clone());
    let callbacks = Callbacks::new()
        .on_save(move |_| saves.lock().unwrap().push("save"))
        .on_create(move |_| creates.lock().unwrap().push("create"));

    let entity = EditableEntity::new(None, Arc::new(MemoryStore::new()))
        .with_listener(Arc::new(callbacks));
    entity.change(path("type"), json!("note")).await;
    entity.change(path("attributes.body"), json!("hi")).await;

    assert!(matches!(entity.save().await.unwrap(), SaveOutcome::Saved(Some(_))));
    assert_eq!(*order.lock().unwrap(), vec!["save", "create"]);
}

#[tokio::test]
async fn listener_is_quiet_when_store_returns_no_identity() {
    let h = creating();
    h.store.set_silent(true);
    h.entity.change(path("type"), json!("note")).await;

    assert_eq!(h.entity.save().await.unwrap(), SaveOutcome::Saved(None));
    assert!(h.listener.events().is_empty());
    assert!(!h.entity.has_changes().await);
}

// ── Config ───────────────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = EditorConfig::default();
    assert_eq!(config.save_error_message, DEFAULT_SAVE_ERROR);
    assert_eq!(config.remove_error_message, DEFAULT_REMOVE_ERROR);
    assert!(config.complete_complex_fields);
}

#[test]
fn config_deserializes_partial_json() {
    let config: EditorConfig =
        serde_json::from_value(json!({"save_error_message": "Could not save"})).unwrap();
    assert_eq!(config.save_error_message, "Could not save");
    assert_eq!(config.remove_error_message, DEFAULT_REMOVE_ERROR);
    assert!(config.complete_complex_fields);
}

#[tokio::test]
async fn completion_can_be_disabled() {
    let h = existing();
    let entity = EditableEntity::new(Some(common::profile()), h.store.clone()).with_config(
        EditorConfig {
            complete_complex_fields: false,
            ..EditorConfig::default()
        },
    );
    entity.change(path("attributes.addr.city"), json!("B")).await;
    entity.save().await.unwrap();

    let calls = h.store.calls();
    let editable_entity::mock::StoreCall::Update(payload) = &calls[0] else {
        panic!("expected update, got {calls:?}");
    };
    assert_eq!(
        payload,
        &json!({"id": "p1", "type": "profile", "attributes": {"addr": {"city": "B"}}})
    );
}
