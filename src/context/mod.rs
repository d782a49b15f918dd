use crate::error::ContextError;
use ahash::AHashMap;
use std::fs;
use std::path::Path;

mod value;

pub use value::ContextValue;

/// The run-scoped key-value store of user-supplied data.
///
/// A context is created once per workflow run, consulted by the template
/// resolver, and mutated in place by `forEach` iteration. Lookups use the
/// whole key verbatim: a dotted key like `user.age` is a single entry, not a
/// traversal into a nested map.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    data: AHashMap<String, ContextValue>,
}

impl UserContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a context from a JSON document, which must be an object.
    pub fn from_json_str(raw: &str) -> Result<Self, ContextError> {
        let document: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| ContextError::Json(e.to_string()))?;
        match document {
            serde_json::Value::Object(entries) => Ok(Self {
                data: entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
            }),
            _ => Err(ContextError::NotAnObject),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ContextError> {
        let raw = std::str::from_utf8(bytes).map_err(|e| ContextError::Json(e.to_string()))?;
        Self::from_json_str(raw)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ContextError> {
        let raw = fs::read_to_string(path).map_err(|e| ContextError::Io(e.to_string()))?;
        Self::from_json_str(&raw)
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.data.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl FromIterator<(String, ContextValue)> for UserContext {
    fn from_iter<I: IntoIterator<Item = (String, ContextValue)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}
