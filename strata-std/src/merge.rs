//! Shallow merge of data into a keyed sub-object.

use serde_json::{Map, Value};
use strata_core::State;

/// Merge `data` into the object at `state[key]`, creating it when missing.
///
/// Equivalent to [`merge_with_current_or`] with an empty object as the
/// initial value.
pub fn merge_with_current(state: State, key: &str, data: Map<String, Value>) -> State {
    merge_with_current_or(state, key, data, || Value::Object(Map::new()))
}

/// Merge `data` into the object at `state[key]`.
///
/// When `state[key]` is missing or not an object it is replaced by `init()`
/// first (and by `{}` if `init()` is not an object either). Fields of `data`
/// overwrite existing fields; the merge is one level deep. A non-object
/// `state` is treated as empty.
pub fn merge_with_current_or(
    state: State,
    key: &str,
    data: Map<String, Value>,
    init: impl FnOnce() -> Value,
) -> State {
    let mut root = match state {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut current = match root.remove(key) {
        Some(Value::Object(map)) => map,
        _ => match init() {
            Value::Object(map) => map,
            _ => Map::new(),
        },
    };
    current.extend(data);

    root.insert(key.to_owned(), Value::Object(current));
    Value::Object(root)
}
