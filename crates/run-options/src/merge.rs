use serde_json::{Map as JsonMap, Value};

use crate::model::RunOptions;

/// Produces the effective options for one run. Neither input is modified,
/// so a harness can merge its base with any number of per-call overrides.
///
/// Rule maps merge per rule id; present scalars replace; `runOnly` is
/// replaced whole; unmodelled keys merge as JSON.
pub fn merge(base: &RunOptions, overrides: &RunOptions) -> RunOptions {
    let mut merged = base.clone();

    for (id, toggle) in &overrides.rules {
        match merged.rules.get_mut(id) {
            Some(existing) => {
                if toggle.enabled.is_some() {
                    existing.enabled = toggle.enabled;
                }
                deep_merge_map(&mut existing.extra, &toggle.extra);
            }
            None => {
                merged.rules.insert(id.clone(), toggle.clone());
            }
        }
    }

    if overrides.iframes.is_some() {
        merged.iframes = overrides.iframes;
    }
    if overrides.selectors.is_some() {
        merged.selectors = overrides.selectors;
    }
    if overrides.element_ref.is_some() {
        merged.element_ref = overrides.element_ref;
    }
    if let Some(run_only) = &overrides.run_only {
        merged.run_only = Some(run_only.clone());
    }
    deep_merge_map(&mut merged.extra, &overrides.extra);

    merged
}

/// Objects merge key by key; anything else in `overlay` replaces `target`.
pub fn deep_merge_value(target: &mut Value, overlay: &Value) {
    if let (Value::Object(target_map), Value::Object(overlay_map)) = (&mut *target, overlay) {
        deep_merge_map(target_map, overlay_map);
        return;
    }
    *target = overlay.clone();
}

pub fn deep_merge_map(target: &mut JsonMap<String, Value>, overlay: &JsonMap<String, Value>) {
    for (key, value) in overlay {
        match target.get_mut(key) {
            Some(existing) => deep_merge_value(existing, value),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}
