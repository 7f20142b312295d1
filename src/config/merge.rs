//! Layer merging
//!
//! Layers are TOML tables:
//! - Tables: merged key by key (recursive)
//! - Everything else, arrays included: the later layer replaces the value

use toml::{Table, Value};

/// Apply `layer` on top of `base` in place.
pub fn overlay(base: &mut Table, layer: Table) {
    for (key, value) in layer {
        match value {
            Value::Table(nested) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => overlay(existing, nested),
                _ => {
                    base.insert(key, Value::Table(nested));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Merge layers in order; the last layer has the highest precedence.
pub fn merge_layers(layers: impl IntoIterator<Item = Table>) -> Table {
    let mut merged = Table::new();
    for layer in layers {
        overlay(&mut merged, layer);
    }
    merged
}
