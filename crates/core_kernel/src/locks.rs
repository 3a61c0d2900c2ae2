//! Per-entity mutual exclusion
//!
//! Mutating workflow operations (approve/reject/record-payment/record-refund)
//! must be serialized per contract, and the coverage ledger's read-then-write
//! must be serialized globally. [`KeyedLocks`] hands out one async mutex per
//! UUID key; guards are held across the load-mutate-save sequence.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// A registry of async mutexes keyed by UUID
///
/// Lock entries are created on first use and kept for the lifetime of the
/// registry; the set of live contracts in one process is small enough that
/// eviction is not worth the bookkeeping.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    entries: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    /// Creates an empty lock registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for the given key, waiting if it is held
    ///
    /// The returned guard keeps the key locked until dropped.
    pub async fn acquire(&self, key: Uuid) -> OwnedMutexGuard<()> {
        let entry = {
            let mut entries = self
                .entries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(entries.entry(key).or_default())
        };
        entry.lock_owned().await
    }
}
