//! JSON merging for layered configuration.

use serde_json::Value;

/// Recursively merge `overlay` into `base`; non-object values replace.
pub(super) fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

/// Merge `overlay` into `base`, skipping any leaf pinned by `locked`.
pub(super) fn merge_json_with_constraints(
    base: &mut Value,
    overlay: &Value,
    locked: Option<&Value>,
) {
    let Some(locked) = locked else {
        merge_json_values(base, overlay);
        return;
    };
    let (Value::Object(base_map), Value::Object(overlay_map), Value::Object(locked_map)) =
        (base, overlay, locked)
    else {
        // A locked leaf; the requirements value stays.
        return;
    };

    for (key, value) in overlay_map {
        match locked_map.get(key) {
            None => match base_map.get_mut(key) {
                Some(existing) => merge_json_values(existing, value),
                None => {
                    base_map.insert(key.clone(), value.clone());
                }
            },
            Some(Value::Object(_)) => {
                let entry = base_map
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(serde_json::Map::new()));
                merge_json_with_constraints(entry, value, locked_map.get(key));
            }
            Some(_) => {}
        }
    }
}
