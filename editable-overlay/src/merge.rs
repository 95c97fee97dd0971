//! Pure folding of an [`Overlay`] over a base document.
//!
//! These functions never mutate the overlay or the base; `build_payload`
//! takes its starting object by value and hands it back untouched when there
//! is nothing to fold.

use editable_types::FieldPath;
use editable_types::json::{get_at, is_vacant, set_at};
use serde_json::{Map, Value};

use crate::Overlay;

/// Top-level member whose second-level containers are submitted whole.
pub const COMPLEX_ROOT: &str = "attributes";

/// The current value at `path`: the pending edit if there is one, else the
/// base value.
pub fn resolve<'a>(
    overlay: &'a Overlay,
    base: Option<&'a Value>,
    path: &FieldPath,
) -> Option<&'a Value> {
    overlay
        .get(path)
        .or_else(|| base.and_then(|doc| get_at(doc, path.segments())))
}

/// Like [`resolve`], falling back to `default`.
pub fn read(overlay: &Overlay, base: Option<&Value>, path: &FieldPath, default: Value) -> Value {
    resolve(overlay, base, path).cloned().unwrap_or(default)
}

/// The base document with every pending edit applied, as the user currently
/// sees it.
///
/// Returns `None` only when there is no base and nothing pending. Without a
/// base, edits are folded into an empty object.
pub fn read_all(overlay: &Overlay, base: Option<&Value>) -> Option<Value> {
    match base {
        Some(doc) => Some(build_payload(overlay, doc.clone(), base, false)),
        None if overlay.is_empty() => None,
        None => Some(build_payload(overlay, Value::Object(Map::new()), None, false)),
    }
}

/// Returns true if `path` addresses something inside an `attributes.<field>`
/// container, i.e. a sub-field of a complex attribute.
pub fn is_complex_subfield(path: &FieldPath) -> bool {
    path.len() > 2 && path.first() == COMPLEX_ROOT
}

/// Folds every overlay entry into `initial`.
///
/// With `complete_complex_fields`, an edit below `attributes.<field>` first
/// pulls the whole `attributes.<field>` container from `source` into the
/// object being built (unless that container is already there), so the
/// submitted field is complete rather than a sparse patch. The edit itself
/// is then written on top.
pub fn build_payload(
    overlay: &Overlay,
    initial: Value,
    source: Option<&Value>,
    complete_complex_fields: bool,
) -> Value {
    overlay.iter().fold(initial, |mut acc, (path, value)| {
        if complete_complex_fields && is_complex_subfield(path) {
            if let Some(container) = path.prefix(2) {
                let container = container.segments();
                if is_vacant(&acc, container) {
                    if let Some(whole) = source.and_then(|doc| get_at(doc, container)) {
                        set_at(&mut acc, container, whole.clone());
                    }
                }
            }
        }
        set_at(&mut acc, path.segments(), value.clone());
        acc
    })
}
