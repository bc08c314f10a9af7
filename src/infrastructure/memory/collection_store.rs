//! In-Memory Collection Store - 测试与演示用的集合存储
//!
//! 每次变更后重建整个集合的快照并推送，与远程存储的
//! 全量重广播语义保持一致（推送的是完整状态，不是增量）。

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::application::ports::{CollectionStorePort, StoreError};
use crate::domain::novel::{CollectionSnapshot, NovelKey, StoredNovel, UserId};

/// 内存集合存储
pub struct InMemoryCollectionStore {
    records: DashMap<NovelKey, StoredNovel>,
    snapshot_tx: watch::Sender<CollectionSnapshot>,
}

impl InMemoryCollectionStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(CollectionSnapshot::new());
        Self {
            records: DashMap::new(),
            snapshot_tx: tx,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn current_snapshot(&self) -> CollectionSnapshot {
        self.records
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// 变更后全量重广播
    fn broadcast(&self) {
        self.snapshot_tx.send_replace(self.current_snapshot());
    }
}

impl Default for InMemoryCollectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CollectionStorePort for InMemoryCollectionStore {
    fn subscribe(&self) -> watch::Receiver<CollectionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    async fn read_once(&self, key: &NovelKey) -> Result<Option<StoredNovel>, StoreError> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn write_whole(&self, key: &NovelKey, record: &StoredNovel) -> Result<(), StoreError> {
        self.records.insert(key.clone(), record.clone());
        self.broadcast();
        Ok(())
    }

    async fn set_like(&self, key: &NovelKey, viewer: &UserId) -> Result<(), StoreError> {
        {
            let mut record = self
                .records
                .get_mut(key)
                .ok_or_else(|| StoreError::BackendError(format!("record not found: {}", key)))?;
            record.likes.insert(viewer.clone(), true);
        }
        self.broadcast();
        Ok(())
    }

    async fn remove_like(&self, key: &NovelKey, viewer: &UserId) -> Result<(), StoreError> {
        {
            let mut record = self
                .records
                .get_mut(key)
                .ok_or_else(|| StoreError::BackendError(format!("record not found: {}", key)))?;
            record.likes.remove(viewer);
        }
        self.broadcast();
        Ok(())
    }

    async fn push(&self, record: &StoredNovel) -> Result<NovelKey, StoreError> {
        let key = NovelKey::new(Uuid::new_v4().to_string());
        self.records.insert(key.clone(), record.clone());
        self.broadcast();
        Ok(key)
    }

    async fn remove(&self, key: &NovelKey) -> Result<(), StoreError> {
        self.records.remove(key);
        self.broadcast();
        Ok(())
    }

    async fn read_all(&self) -> Result<CollectionSnapshot, StoreError> {
        Ok(self.current_snapshot())
    }

    async fn replace_all(&self, snapshot: &CollectionSnapshot) -> Result<(), StoreError> {
        self.records.clear();
        for (key, record) in snapshot {
            self.records.insert(key.clone(), record.clone());
        }
        self.broadcast();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::StoredChapter;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn record(title: &str) -> StoredNovel {
        StoredNovel {
            author_id: UserId::new("u1"),
            author_name: "Doro".to_string(),
            author_photo: None,
            title: title.to_string(),
            chapters: vec![StoredChapter::new("hi")],
            content: None,
            cover_image: String::new(),
            created_at: Utc::now(),
            updated_at: None,
            likes: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_subscribe_carries_current_state_immediately() {
        let store = InMemoryCollectionStore::new();
        store.push(&record("A")).await.unwrap();

        let rx = store.subscribe();
        assert_eq!(rx.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_every_mutation_rebroadcasts_full_snapshot() {
        let store = InMemoryCollectionStore::new();
        let mut rx = store.subscribe();

        let key = store.push(&record("A")).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        store.set_like(&key, &UserId::new("u2")).await.unwrap();
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.get(&key).unwrap().likes.len(), 1);

        store.remove(&key).await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_empty());
    }

    #[tokio::test]
    async fn test_like_on_missing_record_is_backend_error() {
        let store = InMemoryCollectionStore::new();
        let err = store
            .set_like(&NovelKey::new("missing"), &UserId::new("u2"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::BackendError(_)));
    }

    #[tokio::test]
    async fn test_push_assigns_distinct_keys() {
        let store = InMemoryCollectionStore::new();
        let k1 = store.push(&record("A")).await.unwrap();
        let k2 = store.push(&record("B")).await.unwrap();
        assert_ne!(k1, k2);
        assert_eq!(store.read_all().await.unwrap().len(), 2);
    }
}
