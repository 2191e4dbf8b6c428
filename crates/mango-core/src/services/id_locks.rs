use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Per-id mutual exclusion for operations that touch both a record and its asset.
///
/// Entries are created on demand and pruned when the last holder releases, so
/// the map only ever contains ids with an operation in flight.
#[derive(Clone, Default)]
pub struct IdLocks {
    locks: Arc<DashMap<i32, Arc<Mutex<()>>>>,
}

impl IdLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other operation holds `id`.
    pub async fn acquire(&self, id: i32) -> IdLockGuard {
        let mutex = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;
        debug!("Acquired lock for menu item {}", id);
        IdLockGuard {
            id,
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }

    /// Number of ids currently locked or awaited.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

pub struct IdLockGuard {
    id: i32,
    locks: Arc<DashMap<i32, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for IdLockGuard {
    fn drop(&mut self) {
        // Release first so the strong count below only sees waiters.
        drop(self.guard.take());
        self.locks
            .remove_if(&self.id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
