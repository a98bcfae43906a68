use linknova::error::{LinkNovaError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

pub fn to_toml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    toml::to_string_pretty(value).map_err(|e| LinkNovaError::Other(format!("TOML error: {}", e)))
}

/// TOML has no top-level arrays, so lists become `[[key]]` tables
pub fn to_toml_list<T: Serialize>(key: &str, items: &[T]) -> Result<String> {
    let mut table = BTreeMap::new();
    table.insert(key, items);
    to_toml(&table)
}
