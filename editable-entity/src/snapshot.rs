use editable_overlay::{Overlay, merge};
use editable_types::{EntityRef, FieldPath, Resource};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::lifecycle::EntityStatus;

/// Everything a consumer needs to render an entity at one point in time.
///
/// Published on every committed state change; see
/// [`EditableEntity::subscribe`](crate::EditableEntity::subscribe).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub base: Option<Arc<Resource>>,
    pub overlay: Overlay,
    pub status: EntityStatus,
}

impl EntitySnapshot {
    /// Current value at `path` (pending edit, then base), or `default`.
    pub fn get_data(&self, path: &FieldPath, default: Value) -> Value {
        merge::read(&self.overlay, self.base_document(), path, default)
    }

    /// The base with every pending edit applied.
    pub fn get_all_data(&self) -> Option<Value> {
        merge::read_all(&self.overlay, self.base_document())
    }

    pub fn has_changes(&self) -> bool {
        !self.overlay.is_empty()
    }

    /// True when saving would create a new resource.
    pub fn is_new(&self) -> bool {
        self.base.is_none()
    }

    pub fn entity_ref(&self) -> Option<&EntityRef> {
        self.base.as_deref().map(Resource::entity_ref)
    }

    fn base_document(&self) -> Option<&Value> {
        self.base.as_deref().map(Resource::document)
    }
}
