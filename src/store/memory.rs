use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use super::{Store, StoreError};

/// In-memory store for tests and throwaway runs. Same contract as the
/// SQLite backend, nothing persisted.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<(String, String), String>>,
    kinds: Mutex<HashSet<&'static str>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<(String, String), String>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn kinds(&self) -> MutexGuard<'_, HashSet<&'static str>> {
        self.kinds.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_registered(&self, kind: &str) -> Result<(), StoreError> {
        if self.kinds().contains(kind) {
            Ok(())
        } else {
            Err(StoreError::Unregistered(kind.to_string()))
        }
    }
}

impl Store for MemoryStore {
    fn register(&self, kind: &'static str) -> Result<(), StoreError> {
        self.kinds().insert(kind);
        Ok(())
    }

    fn create(&self, kind: &str, key: &str, record: &str) -> Result<(), StoreError> {
        self.check_registered(kind)?;
        match self.records().entry((kind.to_string(), key.to_string())) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                kind: kind.to_string(),
                key: key.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(record.to_string());
                Ok(())
            }
        }
    }

    fn get(&self, kind: &str, key: &str) -> Result<String, StoreError> {
        self.check_registered(kind)?;
        self.records()
            .get(&(kind.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind: kind.to_string(),
                key: key.to_string(),
            })
    }

    fn put(&self, kind: &str, key: &str, record: &str) -> Result<(), StoreError> {
        self.check_registered(kind)?;
        match self.records().get_mut(&(kind.to_string(), key.to_string())) {
            Some(slot) => {
                *slot = record.to_string();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                kind: kind.to_string(),
                key: key.to_string(),
            }),
        }
    }

    fn get_all(&self, kind: &str) -> Result<Vec<String>, StoreError> {
        self.check_registered(kind)?;
        let records = self.records();
        let mut rows: Vec<(&String, &String)> = records
            .iter()
            .filter(|((k, _), _)| k.as_str() == kind)
            .map(|((_, key), record)| (key, record))
            .collect();
        rows.sort();
        Ok(rows.into_iter().map(|(_, record)| record.clone()).collect())
    }
}
