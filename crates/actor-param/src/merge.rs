//! Document merge logic
//!
//! Overlays a child document onto its parent:
//! - Objects: deep-merge by key
//! - Equal values: left untouched
//! - Everything else (scalars, arrays, type changes): overlay wins

use serde_json::Value;

use crate::Document;

/// Merge `overlay` into `base` in place.
///
/// Non-symmetric: `merge_into(parent, child)` yields the effective child.
/// When either side is not an object the overlay replaces the base wholesale.
pub fn merge_into(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            merge_documents(base_map, overlay_map);
        }
        (base, overlay) => {
            if *base != *overlay {
                *base = overlay.clone();
            }
        }
    }
}

/// Key-wise [`merge_into`] for two document payloads.
pub(crate) fn merge_documents(base: &mut Document, overlay: &Document) {
    for (key, overlay_value) in overlay {
        match base.get_mut(key) {
            Some(base_value) => merge_into(base_value, overlay_value),
            None => {
                base.insert(key.clone(), overlay_value.clone());
            }
        }
    }
}

/// By-value form of [`merge_into`].
pub fn deep_merge(mut base: Value, overlay: &Value) -> Value {
    merge_into(&mut base, overlay);
    base
}

/// Merge layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    let mut layers = layers.into_iter();
    let Some(mut merged) = layers.next() else {
        return Value::Null;
    };
    for layer in layers {
        merge_into(&mut merged, &layer);
    }
    merged
}
