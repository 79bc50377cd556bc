// SPDX-License-Identifier: MPL-2.0
//! Lenient merging of a partial user configuration into a default tree.
//!
//! Every key of the defaults survives. Overrides replace scalars and arrays
//! wholesale, nested tables are merged key by key, and an override whose TOML
//! type differs from its default is dropped with a warning.

use toml::{Table, Value};

/// Merges `overrides` into `defaults`, returning a tree with exactly the
/// key set of `defaults`.
#[must_use]
pub fn apply_config(defaults: &Value, overrides: &Value) -> Value {
    merge_value("", defaults, overrides)
}

fn merge_value(path: &str, default: &Value, candidate: &Value) -> Value {
    match (default, candidate) {
        (Value::Table(defaults), Value::Table(overrides)) => {
            Value::Table(merge_table(path, defaults, overrides))
        }
        // TOML keeps integers and floats apart; `zoom = 2` is still a number.
        (Value::Float(_), Value::Integer(i)) => Value::Float(*i as f64),
        _ if same_kind(default, candidate) => candidate.clone(),
        _ => {
            tracing::warn!(
                option = display_path(path),
                expected = default.type_str(),
                found = candidate.type_str(),
                "config option has the wrong type of value, keeping the default"
            );
            default.clone()
        }
    }
}

fn merge_table(path: &str, defaults: &Table, overrides: &Table) -> Table {
    let mut merged = Table::new();

    for (key, default) in defaults {
        let key_path = join(path, key);
        let value = match overrides.get(key) {
            Some(candidate) => merge_value(&key_path, default, candidate),
            None => default.clone(),
        };
        merged.insert(key.clone(), value);
    }

    for key in overrides.keys().filter(|key| !defaults.contains_key(*key)) {
        tracing::warn!(option = %join(path, key), "unknown config option ignored");
    }

    merged
}

fn same_kind(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}
