use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

use crate::json::get_at;
use crate::{Error, FieldPath};

/// The identity of a JSON:API resource.
///
/// This pair is passed verbatim to the create/update/delete collaborators and
/// to listener callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: String,
}

impl EntityRef {
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
        }
    }

    /// The minimal document `{ "id": .., "type": .. }` used as the base of an
    /// update payload.
    pub fn to_document(&self) -> Value {
        json!({ "id": self.id, "type": self.entity_type })
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.id)
    }
}

/// A persisted resource document: `id`, `type`, and an arbitrary tree
/// (`attributes`, `relationships`, ...).
///
/// The document is always a JSON object whose `id` and `type` members are
/// strings; [`Resource::from_value`] enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Resource {
    identity: EntityRef,
    document: Value,
}

impl Resource {
    /// Creates a resource with no attributes.
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>) -> Self {
        let identity = EntityRef::new(id, entity_type);
        let document = identity.to_document();
        Self { identity, document }
    }

    /// Validates and wraps a resource document.
    pub fn from_value(document: Value) -> Result<Self, Error> {
        let Value::Object(ref obj) = document else {
            return Err(Error::InvalidResource(
                "resource document must be an object".into(),
            ));
        };
        let id = identity_member(obj, "id")?;
        let entity_type = identity_member(obj, "type")?;
        Ok(Self {
            identity: EntityRef::new(id, entity_type),
            document,
        })
    }

    /// Parses a resource from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, Error> {
        Self::from_value(serde_json::from_str(s)?)
    }

    /// Sets `attributes.<name>` (builder style).
    pub fn with_attribute(self, name: &str, value: Value) -> Self {
        self.with_member("attributes", name, value)
    }

    /// Sets `relationships.<name>` (builder style).
    pub fn with_relationship(self, name: &str, value: Value) -> Self {
        self.with_member("relationships", name, value)
    }

    fn with_member(mut self, section: &str, name: &str, value: Value) -> Self {
        if let Value::Object(obj) = &mut self.document {
            let entry = obj
                .entry(section.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(members) = entry {
                members.insert(name.to_string(), value);
            }
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn entity_type(&self) -> &str {
        &self.identity.entity_type
    }

    pub fn entity_ref(&self) -> &EntityRef {
        &self.identity
    }

    /// The full document, including `id` and `type`.
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn into_document(self) -> Value {
        self.document
    }

    /// Value at `path`, if present.
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        get_at(&self.document, path.segments())
    }

    pub fn get_str(&self, path: &FieldPath) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_bool(&self, path: &FieldPath) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    pub fn get_number(&self, path: &FieldPath) -> Option<f64> {
        self.get(path).and_then(Value::as_f64)
    }
}

fn identity_member(obj: &Map<String, Value>, key: &str) -> Result<String, Error> {
    match obj.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(Error::InvalidResource(format!("`{key}` is empty"))),
        Some(_) => Err(Error::InvalidResource(format!("`{key}` must be a string"))),
        None => Err(Error::InvalidResource(format!("missing `{key}`"))),
    }
}

impl TryFrom<Value> for Resource {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Resource> for Value {
    fn from(resource: Resource) -> Self {
        resource.document
    }
}
