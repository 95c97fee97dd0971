//! Core type definitions for editable entities.
//!
//! This crate defines the small set of types every other crate in the
//! workspace depends on:
//! - [`FieldPath`]: a validated dotted path into a resource document
//! - [`EntityRef`]: the `{id, type}` identity pair of a JSON:API resource
//! - [`Resource`]: a base entity document (identity plus arbitrary tree)
//!
//! Overlay and lifecycle logic live in `editable-overlay` and
//! `editable-entity`.

pub mod json;
mod path;
mod resource;

pub use path::FieldPath;
pub use resource::{EntityRef, Resource};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing core types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid field path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
