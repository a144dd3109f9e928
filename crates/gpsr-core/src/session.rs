//! Shared session state: the ordered command list and the UI-enable gate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use crate::command::CommandRecord;
use crate::error::{GpsrError, Result};

/// Ordered, mutable collection of command records plus the UI-enable gate.
///
/// Exactly one logical owner (the operation controller) mutates the
/// records; readers take snapshots. Every mutation is wholesale — a whole
/// record or a whole phrasing list is swapped in one step, never field by
/// field, so a reader can never observe a partial write.
pub struct SessionStore {
    records: RwLock<Vec<CommandRecord>>,
    enabled: AtomicBool,
}

impl SessionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            records: RwLock::new(Vec::new()),
            enabled: AtomicBool::new(true),
        })
    }

    /// Whether the UI may dispatch a new operation.
    ///
    /// The gate is advisory: the store never blocks a caller that ignores
    /// it. Presentation code is expected to consult it before dispatching,
    /// and two operations racing the same index get last-writer-wins.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Marks the session busy for the lifetime of the returned guard.
    ///
    /// Dropping the guard re-enables the session unconditionally, so the
    /// Busy -> Idle transition holds on every path, failures included.
    pub fn begin_operation(self: &Arc<Self>) -> OperationGuard {
        self.enabled.store(false, Ordering::SeqCst);
        OperationGuard {
            store: Arc::clone(self),
        }
    }

    /// Returns a copy of the current record list.
    pub async fn snapshot(&self) -> Vec<CommandRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn get(&self, index: usize) -> Option<CommandRecord> {
        self.records.read().await.get(index).cloned()
    }

    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Publishes a freshly generated batch, replacing the whole list.
    pub async fn publish(&self, records: Vec<CommandRecord>) {
        *self.records.write().await = records;
    }

    /// Replaces the record at `index` wholesale.
    pub async fn replace(&self, index: usize, record: CommandRecord) -> Result<()> {
        let mut records = self.records.write().await;
        let slot = records
            .get_mut(index)
            .ok_or(GpsrError::NoSuchCommand(index))?;
        *slot = record;
        Ok(())
    }

    /// Replaces the phrasing list of the record at `index` wholesale.
    pub async fn set_phrasings(&self, index: usize, phrasings: Vec<String>) -> Result<()> {
        let mut records = self.records.write().await;
        let slot = records
            .get_mut(index)
            .ok_or(GpsrError::NoSuchCommand(index))?;
        slot.phrasings = phrasings;
        Ok(())
    }
}

/// RAII handle for an in-flight operation.
///
/// Holds the session in the Busy state; dropping it restores Idle.
pub struct OperationGuard {
    store: Arc<SessionStore>,
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        self.store.enabled.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Category;

    #[tokio::test]
    async fn gate_is_released_when_guard_drops() {
        let store = SessionStore::new();
        assert!(store.is_enabled());

        {
            let _guard = store.begin_operation();
            assert!(!store.is_enabled());
        }

        assert!(store.is_enabled());
    }

    #[tokio::test]
    async fn gate_is_released_on_early_return() {
        let store = SessionStore::new();

        let failing = |store: Arc<SessionStore>| async move {
            let _guard = store.begin_operation();
            Err::<(), _>(GpsrError::generator("grammar engine unavailable"))
        };

        assert!(failing(Arc::clone(&store)).await.is_err());
        assert!(store.is_enabled());
    }

    #[tokio::test]
    async fn replace_swaps_one_record() {
        let store = SessionStore::new();
        store
            .publish(vec![
                CommandRecord::new("first", Category::People),
                CommandRecord::new("second", Category::Objects),
            ])
            .await;

        store
            .replace(1, CommandRecord::new("replacement", Category::Objects))
            .await
            .unwrap();

        let records = store.snapshot().await;
        assert_eq!(records[0].command, "first");
        assert_eq!(records[1].command, "replacement");
    }

    #[tokio::test]
    async fn set_phrasings_replaces_wholesale() {
        let store = SessionStore::new();
        let mut record = CommandRecord::new("bring the tray", Category::Unspecified);
        record.phrasings = vec!["old".to_string()];
        store.publish(vec![record]).await;

        store
            .set_phrasings(0, vec!["a".to_string(), "b".to_string(), "c".to_string()])
            .await
            .unwrap();

        let records = store.snapshot().await;
        assert_eq!(records[0].phrasings, vec!["a", "b", "c"]);
        assert_eq!(records[0].command, "bring the tray");
    }

    #[tokio::test]
    async fn index_past_end_is_reported() {
        let store = SessionStore::new();
        let err = store
            .set_phrasings(3, vec!["x".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err, GpsrError::NoSuchCommand(3));
    }
}
