use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::{schema, Store, StoreError};

/// SQLite-backed store. One `records` table holds every kind; the composite
/// primary key is what makes `create` atomic under concurrent imports.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    kinds: Mutex<HashSet<&'static str>>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let store = Self {
            conn: Mutex::new(conn),
            kinds: Mutex::new(HashSet::new()),
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
            kinds: Mutex::new(HashSet::new()),
        };
        store.migrate()?;
        Ok(store)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn kinds(&self) -> MutexGuard<'_, HashSet<&'static str>> {
        self.kinds.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.conn();

        let has_version_table: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            conn.execute_batch(schema::SCHEMA_V1)?;
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn check_registered(&self, kind: &str) -> Result<(), StoreError> {
        if self.kinds().contains(kind) {
            Ok(())
        } else {
            Err(StoreError::Unregistered(kind.to_string()))
        }
    }
}

impl Store for SqliteStore {
    fn register(&self, kind: &'static str) -> Result<(), StoreError> {
        self.kinds().insert(kind);
        Ok(())
    }

    fn create(&self, kind: &str, key: &str, record: &str) -> Result<(), StoreError> {
        self.check_registered(kind)?;
        let result = self.conn().execute(
            "INSERT INTO records (kind, key, record) VALUES (?1, ?2, ?3)",
            params![kind, key, record],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Duplicate {
                    kind: kind.to_string(),
                    key: key.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, kind: &str, key: &str) -> Result<String, StoreError> {
        self.check_registered(kind)?;
        let result = self.conn().query_row(
            "SELECT record FROM records WHERE kind = ?1 AND key = ?2",
            params![kind, key],
            |row| row.get(0),
        );
        match result {
            Ok(record) => Ok(record),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound {
                kind: kind.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, kind: &str, key: &str, record: &str) -> Result<(), StoreError> {
        self.check_registered(kind)?;
        let changed = self.conn().execute(
            "UPDATE records SET record = ?3 WHERE kind = ?1 AND key = ?2",
            params![kind, key, record],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: kind.to_string(),
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn get_all(&self, kind: &str) -> Result<Vec<String>, StoreError> {
        self.check_registered(kind)?;
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT record FROM records WHERE kind = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![kind], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
