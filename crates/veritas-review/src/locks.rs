// crates/veritas-review/src/locks.rs
//
// Per-content-item serialization.
//
// The orchestrator's check-then-act windows (submission's two status
// writes, vote count to status write, dispute filing to status write)
// must not interleave for the same content item. Each item gets its own
// mutex, handed out as an owned guard so callers can hold it across
// awaits.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

/// Registry of per-content-item mutexes, created on first use.
///
/// Entries are never removed; the registry grows with the number of
/// items that have seen a locked operation, which is bounded by the
/// store's content set.
#[derive(Debug, Default)]
pub struct ContentLocks {
    inner: RwLock<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ContentLocks {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Acquire the lock for one content item.
    ///
    /// Callers for different items never contend; callers for the same
    /// item queue in arrival order.
    pub async fn acquire(&self, content_id: &Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.inner.write().await;
            registry.entry(*content_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_same_item_blocks_second_acquire() {
        let locks = ContentLocks::new();
        let id = Uuid::now_v7();

        let _held = locks.acquire(&id).await;
        let second = timeout(Duration::from_millis(50), locks.acquire(&id)).await;
        assert!(second.is_err(), "second acquire should block while held");
    }

    #[tokio::test]
    async fn test_released_lock_can_be_reacquired() {
        let locks = ContentLocks::new();
        let id = Uuid::now_v7();

        drop(locks.acquire(&id).await);
        let reacquired = timeout(Duration::from_millis(50), locks.acquire(&id)).await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn test_different_items_do_not_contend() {
        let locks = ContentLocks::new();

        let _held = locks.acquire(&Uuid::now_v7()).await;
        let other = timeout(Duration::from_millis(50), locks.acquire(&Uuid::now_v7())).await;
        assert!(other.is_ok());
    }
}
