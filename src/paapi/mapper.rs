//! Maps raw JSON payloads onto typed responses.

use crate::error::{PaapiError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Stateless JSON-to-model mapper.
///
/// In strict mode any non-null field in the payload that the target type does
/// not capture is an error; lenient mode silently drops such fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseMapper {
    strict: bool,
}

impl ResponseMapper {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn lenient() -> Self {
        Self::new(false)
    }

    pub fn strict() -> Self {
        Self::new(true)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Deserializes `raw` into `T`.
    ///
    /// Empty or malformed JSON is reported as [`PaapiError::Serialization`].
    pub fn map<T: DeserializeOwned + Serialize>(&self, raw: &str) -> Result<T> {
        if raw.trim().is_empty() {
            debug!("Empty response body");
            return Err(PaapiError::Serialization(None));
        }

        if !self.strict {
            return Ok(serde_json::from_str(raw)?);
        }

        let raw_value: Value = serde_json::from_str(raw)?;
        let typed: T = serde_json::from_value(raw_value.clone())?;
        let mapped = serde_json::to_value(&typed)?;

        if let Some(path) = find_unmapped(&raw_value, &mapped, String::new()) {
            warn!("Strict mapping rejected unmapped field {}", path);
            return Err(PaapiError::UnmappedField { path });
        }

        Ok(typed)
    }
}

/// Returns the path of the first non-null field in `raw` that is missing from `mapped`.
fn find_unmapped(raw: &Value, mapped: &Value, path: String) -> Option<String> {
    match (raw, mapped) {
        (Value::Object(raw_fields), Value::Object(mapped_fields)) => {
            raw_fields.iter().filter(|(_, v)| !v.is_null()).find_map(|(key, raw_child)| {
                let child_path = if path.is_empty() { key.clone() } else { format!("{}.{}", path, key) };
                match mapped_fields.get(key) {
                    Some(mapped_child) => find_unmapped(raw_child, mapped_child, child_path),
                    None => Some(child_path),
                }
            })
        }
        (Value::Array(raw_items), Value::Array(mapped_items)) => raw_items
            .iter()
            .zip(mapped_items)
            .enumerate()
            .find_map(|(i, (r, m))| find_unmapped(r, m, format!("{}[{}]", path, i))),
        _ => None,
    }
}
