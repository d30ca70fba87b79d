//! Key-scoped mutual exclusion.
//!
//! [`KeyedLock`] hands out one async mutex per key, created on first use and
//! kept for the lifetime of the registry. Work for the same key is serialised;
//! work for different keys never contends beyond the brief map lookup.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

/// Registry of per-key locks.
///
/// Entries are never evicted, so the map grows with the number of distinct
/// keys ever seen, not with request volume.
///
/// # Examples
/// ```
/// use point_ledger::domain::KeyedLock;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let locks = KeyedLock::new();
/// let value = locks.with_lock(&"alice", || async { 40 + 2 }).await;
/// assert_eq!(value, 42);
/// assert_eq!(locks.tracked_keys().await, 1);
/// # });
/// ```
#[derive(Debug)]
pub struct KeyedLock<K> {
    locks: RwLock<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for KeyedLock<K> {
    fn default() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }
}

impl<K> KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `operation` while holding the lock for `key`.
    ///
    /// The guard is dropped on every exit path, including when `operation`
    /// returns an error or unwinds.
    pub async fn with_lock<F, Fut, T>(&self, key: &K, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let lock = self.lock_for(key).await;
        let _guard = lock.lock().await;
        operation().await
    }

    /// Number of keys with an allocated lock.
    pub async fn tracked_keys(&self) -> usize {
        self.locks.read().await.len()
    }

    async fn lock_for(&self, key: &K) -> Arc<Mutex<()>> {
        {
            let locks = self.locks.read().await;
            if let Some(lock) = locks.get(key) {
                return Arc::clone(lock);
            }
        }

        // Re-check under the write lock: another task may have inserted first.
        let mut locks = self.locks.write().await;
        Arc::clone(
            locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}
