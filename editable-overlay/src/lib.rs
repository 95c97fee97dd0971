//! Change overlay and merge engine.
//!
//! An [`Overlay`] holds uncommitted field edits keyed by [`FieldPath`]. The
//! [`merge`] module folds those edits over a base document, either for display
//! ([`merge::read`], [`merge::read_all`]) or for submission
//! ([`merge::build_payload`]).
//!
//! Everything here is pure and synchronous; the async lifecycle that drives
//! saves lives in `editable-entity`.
//!
//! # Example
//!
//! ```
//! use editable_overlay::{merge, Overlay};
//! use editable_types::FieldPath;
//! use serde_json::json;
//!
//! let base = json!({"attributes": {"addr": {"city": "A", "zip": "1"}}});
//! let mut overlay = Overlay::new();
//! overlay.change(FieldPath::parse("attributes.addr.city").unwrap(), json!("B"));
//!
//! let payload = merge::build_payload(&overlay, json!({}), Some(&base), true);
//! assert_eq!(payload, json!({"attributes": {"addr": {"city": "B", "zip": "1"}}}));
//! ```

pub mod merge;
mod overlay;

pub use editable_types::FieldPath;
pub use overlay::Overlay;
