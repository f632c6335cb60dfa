//! Per-conference mutual exclusion.
//!
//! Every mutating booking flow touches at least two records (seat counter
//! plus booking/waitlist/window), so flows that reference the same
//! conference must not interleave. Each conference name maps to its own
//! async mutex; flows on different conferences run fully in parallel.
//!
//! Lock entries are never removed — conferences are never deleted in this
//! system, so the registry only grows with the conference table.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-conference locks.
pub struct ConferenceLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ConferenceLocks {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the exclusive lock for `conference`, creating it on first
    /// use. The guard is held for the duration of one logical operation.
    pub async fn acquire(&self, conference: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().await;
            locks
                .entry(conference.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

impl Default for ConferenceLocks {
    fn default() -> Self {
        Self::new()
    }
}
