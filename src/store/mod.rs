mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} record already exists for key {key}")]
    Duplicate { kind: String, key: String },
    #[error("no {kind} record for key {key}")]
    NotFound { kind: String, key: String },
    #[error("entity kind '{0}' is not registered")]
    Unregistered(String),
    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),
    #[error("record encoding error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// A storable record: serde-encodable, tagged with its kind, addressed by a
/// key it derives itself.
pub trait Entity: Serialize + DeserializeOwned {
    const KIND: &'static str;

    fn key(&self) -> String;
}

/// Key-addressed persistence contract over (kind, key, JSON record).
///
/// Implementations must enforce `create`-if-absent atomically; that check is
/// the only thing standing between a re-imported statement line and a
/// duplicate record.
pub trait Store: Send + Sync {
    /// Register an entity kind. Must happen before the kind's first use;
    /// operations on unregistered kinds fail.
    fn register(&self, kind: &'static str) -> Result<(), StoreError>;

    /// Store a new record, failing with [`StoreError::Duplicate`] when the
    /// key is already taken.
    fn create(&self, kind: &str, key: &str, record: &str) -> Result<(), StoreError>;

    fn get(&self, kind: &str, key: &str) -> Result<String, StoreError>;

    /// Overwrite an existing record. Update path only; new records go
    /// through [`Store::create`].
    fn put(&self, kind: &str, key: &str, record: &str) -> Result<(), StoreError>;

    /// Every record of the kind, in backend index order. Callers must not
    /// rely on it for display order.
    fn get_all(&self, kind: &str) -> Result<Vec<String>, StoreError>;
}

// ── Typed layer ───────────────────────────────────────────────

pub fn create<E: Entity>(store: &dyn Store, entity: &E) -> Result<(), StoreError> {
    let record = serde_json::to_string(entity)?;
    store.create(E::KIND, &entity.key(), &record)
}

pub fn get<E: Entity>(store: &dyn Store, key: &str) -> Result<E, StoreError> {
    let record = store.get(E::KIND, key)?;
    Ok(serde_json::from_str(&record)?)
}

/// Load the freshest copy, apply a pure mutation, write it back. Returns the
/// updated entity.
pub fn update<E: Entity>(
    store: &dyn Store,
    key: &str,
    apply: impl FnOnce(&mut E),
) -> Result<E, StoreError> {
    let mut entity: E = get(store, key)?;
    apply(&mut entity);
    let record = serde_json::to_string(&entity)?;
    store.put(E::KIND, key, &record)?;
    Ok(entity)
}

pub fn get_all<E: Entity>(store: &dyn Store) -> Result<Vec<E>, StoreError> {
    store
        .get_all(E::KIND)?
        .iter()
        .map(|record| Ok(serde_json::from_str(record)?))
        .collect()
}
