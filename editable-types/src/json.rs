//! Segment-addressed access into `serde_json::Value` trees.

use serde_json::{Map, Value};

/// Returns the value at `segments`, or `None` if any step is missing.
///
/// Object members are looked up by key; array elements by a segment that
/// parses as an in-bounds index. An empty segment list yields `value` itself.
pub fn get_at<'a>(value: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(value, |current, seg| match current {
            Value::Object(obj) => obj.get(seg),
            Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Largest run of `null`s [`set_at`] will pad an array with to reach an
/// index past its end.
pub const MAX_ARRAY_GAP: usize = 1024;

/// Writes `value` at `segments`, creating intermediate objects as needed.
///
/// Scalars (and `null`) found along the way are replaced by objects. An
/// array is indexed in place when the segment is an index; an index past the
/// end pads the array with `null`s, at most [`MAX_ARRAY_GAP`] of them. Any
/// other segment turns the array into an object keyed by the old indices, so
/// existing elements are kept either way.
pub fn set_at(target: &mut Value, segments: &[String], value: Value) {
    let [head, rest @ ..] = segments else {
        *target = value;
        return;
    };

    if let Value::Array(items) = target {
        if let Ok(index) = head.parse::<usize>() {
            if index >= items.len() && index - items.len() <= MAX_ARRAY_GAP {
                items.resize(index + 1, Value::Null);
            }
            if let Some(slot) = items.get_mut(index) {
                set_at(slot, rest, value);
                return;
            }
        }
    }

    if !target.is_object() {
        *target = match target.take() {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect::<Map<String, Value>>()
                .into(),
            _ => Value::Object(Map::new()),
        };
    }
    if let Value::Object(obj) = target {
        let entry = obj.entry(head.clone()).or_insert(Value::Null);
        set_at(entry, rest, value);
    }
}

/// Returns true when nothing, or an explicit `null`, sits at `segments`.
pub fn is_vacant(value: &Value, segments: &[String]) -> bool {
    get_at(value, segments).is_none_or(Value::is_null)
}
