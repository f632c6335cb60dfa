//! In-memory record store.
//!
//! The storage backend is treated as an external collaborator with plain
//! keyed CRUD semantics: no transactions, no indexes, no durability. Each
//! entity type gets its own logical table. The store has an explicit
//! lifecycle: it is constructed once at process start, injected into the
//! application state, and dropped at shutdown — there is no ambient global
//! state.
//!
//! Atomicity across tables is NOT provided here; the service layer
//! serializes multi-table mutations behind per-conference locks.

use crate::models::{Booking, Conference, ConfirmationWindow, User, WaitlistEntry};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Error returned by [`Table::create`] when the key is already taken.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("duplicate key '{key}' in table '{table}'")]
pub struct DuplicateKey {
    /// The offending key.
    pub key: String,
    /// Table the insert was attempted on.
    pub table: &'static str,
}

/// A single keyed table of records.
///
/// Rows are held behind an async `RwLock`; individual operations are atomic
/// but sequences of operations are not.
pub struct Table<T> {
    name: &'static str,
    rows: RwLock<HashMap<String, T>>,
}

impl<T: Clone> Table<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Table name (used in error reporting and logs).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fetch a record by key.
    pub async fn get(&self, key: &str) -> Option<T> {
        self.rows.read().await.get(key).cloned()
    }

    /// Insert a record under `key`.
    ///
    /// Fails with [`DuplicateKey`] if the key is taken; the existing record
    /// is left unchanged.
    pub async fn create(&self, key: &str, record: T) -> Result<T, DuplicateKey> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(key) {
            return Err(DuplicateKey {
                key: key.to_string(),
                table: self.name,
            });
        }
        rows.insert(key.to_string(), record.clone());
        Ok(record)
    }

    /// Apply `patch` to the record under `key`, returning the updated record.
    ///
    /// Returns `None` if the key is absent.
    pub async fn update(&self, key: &str, patch: impl FnOnce(&mut T)) -> Option<T> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(key)?;
        patch(row);
        Some(row.clone())
    }

    /// Apply a fallible `patch` to the record under `key`.
    ///
    /// The patch runs against a copy; if it errors, the stored record is
    /// left untouched. Returns `Ok(None)` if the key is absent.
    pub async fn try_update<E>(
        &self,
        key: &str,
        patch: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Result<Option<T>, E> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.get_mut(key) else {
            return Ok(None);
        };
        let mut candidate = row.clone();
        patch(&mut candidate)?;
        *row = candidate.clone();
        Ok(Some(candidate))
    }

    /// Remove the record under `key`. Returns whether a record was removed.
    pub async fn delete(&self, key: &str) -> bool {
        self.rows.write().await.remove(key).is_some()
    }

    /// List records matching `filter`, ordered by key, with offset/limit
    /// applied after filtering.
    pub async fn list(
        &self,
        filter: impl Fn(&T) -> bool,
        limit: Option<usize>,
        offset: usize,
    ) -> Vec<T> {
        let rows = self.rows.read().await;
        let mut keyed: Vec<(&String, &T)> = rows.iter().filter(|(_, row)| filter(row)).collect();
        keyed.sort_by(|a, b| a.0.cmp(b.0));
        keyed
            .into_iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .map(|(_, row)| row.clone())
            .collect()
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the table holds no records.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

/// The in-memory record store: one table per entity type.
pub struct MemoryStore {
    /// Conference definitions, keyed by conference name.
    pub conferences: Table<Conference>,
    /// Users, keyed by user id.
    pub users: Table<User>,
    /// Bookings, keyed by booking id.
    pub bookings: Table<Booking>,
    /// Per-conference waitlist queues, keyed by conference name.
    pub waitlists: Table<WaitlistEntry>,
    /// Outstanding confirmation windows, keyed by booking id.
    pub windows: Table<ConfirmationWindow>,
}

impl MemoryStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self {
            conferences: Table::new("conferences"),
            users: Table::new("users"),
            bookings: Table::new("bookings"),
            waitlists: Table::new("waitlists"),
            windows: Table::new("windows"),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
