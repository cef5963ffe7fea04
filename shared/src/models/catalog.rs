//! Catalog models and the in-memory catalog index

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::CatalogKey;

/// One catalog item as published by the catalog data files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// Stable catalog key, conventionally "{manufacturer}-{code}"
    pub id: CatalogKey,
    /// Manufacturer's product code (not unique across manufacturers)
    pub code: String,
    pub manufacturer: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub synonyms: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Display metadata resolved for a catalog key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogMetadata {
    pub name: String,
    pub manufacturer: String,
}

/// Top-level shape of a catalog JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub colors: Vec<CatalogEntry>,
}

/// Read-only index over catalog entries
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: BTreeMap<CatalogKey, CatalogEntry>,
    by_lower_key: HashMap<String, CatalogKey>,
    by_code: HashMap<String, Vec<CatalogKey>>,
}

impl CatalogIndex {
    /// Build an index; a later entry with the same key replaces an earlier one
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut index = Self::default();
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    /// Parse a `{ "colors": [...] }` catalog document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Ok(Self::from_entries(document.colors))
    }

    fn insert(&mut self, entry: CatalogEntry) {
        let key = entry.id.clone();
        if let Some(previous) = self.entries.insert(key.clone(), entry) {
            let code = previous.code.trim().to_lowercase();
            if let Some(keys) = self.by_code.get_mut(&code) {
                keys.retain(|k| k != &key);
            }
        }

        let entry = &self.entries[&key];
        self.by_lower_key
            .insert(key.as_str().to_lowercase(), key.clone());
        self.by_code
            .entry(entry.code.trim().to_lowercase())
            .or_default()
            .push(key);
    }

    /// Resolve an external item code to a catalog key.
    ///
    /// Tries an exact key match, then a case-insensitive key match, then a bare
    /// product code that belongs to exactly one catalog entry.
    pub fn resolve(&self, code: &str) -> Option<CatalogKey> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        if let Some((key, _)) = self.entries.get_key_value(code) {
            return Some(key.clone());
        }

        let lowered = code.to_lowercase();
        if let Some(key) = self.by_lower_key.get(&lowered) {
            return Some(key.clone());
        }

        match self.by_code.get(&lowered).map(Vec::as_slice) {
            Some([only]) => Some(only.clone()),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn metadata(&self, key: &str) -> Option<CatalogMetadata> {
        self.entries.get(key).map(|entry| CatalogMetadata {
            name: entry.name.clone(),
            manufacturer: entry.manufacturer.clone(),
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
