use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// In-memory values of the virtual attributes of one entity instance.
///
/// `declared` holds every virtual name the configuration can produce, so a
/// name is recognized before any value has been loaded for it.
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    values: HashMap<String, Option<String>>,
    declared: Arc<BTreeSet<String>>,
}

impl AttributeStore {
    pub fn new(declared: Arc<BTreeSet<String>>) -> Self {
        Self {
            values: HashMap::new(),
            declared,
        }
    }

    /// True if `name` is declared or currently holds a value.
    pub fn contains(&self, name: &str) -> bool {
        self.declared.contains(name) || self.values.contains_key(name)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Value of `name`; `None` when unset or null.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        self.values.remove(name)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}
