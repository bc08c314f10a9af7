//! Sync Worker - 会话同步循环
//!
//! 持有会话生命周期内唯一的集合订阅。每次快照推送以当时已知的
//! 观看者身份全量重投影并校正界面状态；身份变更时拆除并重建订阅，
//! 保证投影永远不会以过期身份计算。

use std::sync::Arc;

use crate::application::navigator::{Navigator, Reconciliation};
use crate::application::ports::{
    CollectionStorePort, IdentityProviderPort, Notice, NoticePort, Viewer,
};
use crate::application::projection::NovelProjection;
use crate::domain::novel::CollectionSnapshot;

/// 同步 Worker
pub struct SyncWorker {
    store: Arc<dyn CollectionStorePort>,
    identity: Arc<dyn IdentityProviderPort>,
    projection: Arc<NovelProjection>,
    navigator: Arc<Navigator>,
    notices: Arc<dyn NoticePort>,
}

impl SyncWorker {
    pub fn new(
        store: Arc<dyn CollectionStorePort>,
        identity: Arc<dyn IdentityProviderPort>,
        projection: Arc<NovelProjection>,
        navigator: Arc<Navigator>,
        notices: Arc<dyn NoticePort>,
    ) -> Self {
        Self {
            store,
            identity,
            projection,
            navigator,
            notices,
        }
    }

    /// 启动同步循环
    pub async fn run(self) {
        let mut identity_rx = self.identity.watch();
        let mut viewer = identity_rx.borrow().clone();

        let mut snapshot_rx = self.store.subscribe();

        tracing::info!(
            viewer = viewer.as_ref().map(|v| v.id.as_str()).unwrap_or("anonymous"),
            "SyncWorker started"
        );

        // 订阅建立即携带当前状态
        let initial = snapshot_rx.borrow().clone();
        self.apply(&initial, viewer.as_ref());

        loop {
            tokio::select! {
                changed = identity_rx.changed() => {
                    if changed.is_err() {
                        tracing::info!("Identity provider closed");
                        break;
                    }
                    let next = identity_rx.borrow_and_update().clone();
                    self.announce_identity_change(viewer.as_ref(), next.as_ref());
                    viewer = next;

                    // 身份变更：拆除旧订阅并重建，立即以新身份重投影
                    snapshot_rx = self.store.subscribe();
                    let snapshot = snapshot_rx.borrow().clone();
                    self.apply(&snapshot, viewer.as_ref());
                }
                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        tracing::info!("Collection subscription closed");
                        break;
                    }
                    let snapshot = snapshot_rx.borrow_and_update().clone();
                    self.apply(&snapshot, viewer.as_ref());
                }
            }
        }

        tracing::info!("SyncWorker stopped");
    }

    /// 全量重投影并校正界面状态
    fn apply(&self, snapshot: &CollectionSnapshot, viewer: Option<&Viewer>) {
        self.projection.apply(snapshot, viewer.map(|v| &v.id));
        tracing::debug!(records = snapshot.len(), "Projection replaced");

        match self.navigator.reconcile(&self.projection) {
            Reconciliation::EvictedToListing(key) => {
                self.notices.publish(Notice::SelectionRemoved { key });
            }
            Reconciliation::ChapterClamped | Reconciliation::Unchanged => {}
        }
    }

    fn announce_identity_change(&self, previous: Option<&Viewer>, next: Option<&Viewer>) {
        match (previous, next) {
            (None, Some(viewer)) => {
                tracing::info!(id = %viewer.id, "Viewer signed in");
                self.notices.publish(Notice::SignedIn {
                    display_name: viewer.display_name.clone(),
                });
            }
            (Some(_), None) => {
                tracing::info!("Viewer signed out");
                self.notices.publish(Notice::SignedOut);
            }
            (Some(previous), Some(next)) if previous.id != next.id => {
                tracing::info!(id = %next.id, "Viewer switched");
                self.notices.publish(Notice::SignedIn {
                    display_name: next.display_name.clone(),
                });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::{StoredChapter, StoredNovel, UserId};
    use crate::infrastructure::events::BroadcastNoticePublisher;
    use crate::infrastructure::memory::{InMemoryCollectionStore, StaticIdentityProvider};
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn record(author: &str, title: &str, liked_by: &[&str]) -> StoredNovel {
        StoredNovel {
            author_id: UserId::new(author),
            author_name: author.to_string(),
            author_photo: None,
            title: title.to_string(),
            chapters: vec![StoredChapter::new("hi")],
            content: None,
            cover_image: String::new(),
            created_at: Utc::now(),
            updated_at: None,
            likes: liked_by.iter().map(|id| (UserId::new(*id), true)).collect(),
        }
    }

    struct Harness {
        store: Arc<InMemoryCollectionStore>,
        identity: Arc<StaticIdentityProvider>,
        projection: Arc<NovelProjection>,
        navigator: Arc<Navigator>,
        notices: Arc<BroadcastNoticePublisher>,
    }

    impl Harness {
        fn new(identity: StaticIdentityProvider) -> Self {
            Self {
                store: InMemoryCollectionStore::new().arc(),
                identity: identity.arc(),
                projection: NovelProjection::new().arc(),
                navigator: Navigator::new().arc(),
                notices: BroadcastNoticePublisher::new().arc(),
            }
        }

        fn spawn(&self) -> tokio::task::JoinHandle<()> {
            let worker = SyncWorker::new(
                self.store.clone(),
                self.identity.clone(),
                self.projection.clone(),
                self.navigator.clone(),
                self.notices.clone(),
            );
            tokio::spawn(worker.run())
        }

        /// 轮询等待条件成立（worker 在后台任务中处理推送）
        async fn wait_until(&self, predicate: impl Fn(&Harness) -> bool) {
            tokio::time::timeout(Duration::from_secs(2), async {
                loop {
                    if predicate(self) {
                        return;
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            })
            .await
            .expect("condition not reached in time");
        }
    }

    #[tokio::test]
    async fn test_store_mutations_reach_projection() {
        let harness = Harness::new(StaticIdentityProvider::anonymous());
        harness.spawn();

        let key = harness.store.push(&record("u1", "A", &[])).await.unwrap();
        harness.wait_until(|h| h.projection.len() == 1).await;

        harness.store.remove(&key).await.unwrap();
        harness.wait_until(|h| h.projection.is_empty()).await;
    }

    #[tokio::test]
    async fn test_identity_change_reprojects_without_new_emission() {
        let harness = Harness::new(StaticIdentityProvider::anonymous());
        let key = harness
            .store
            .push(&record("u1", "A", &["u2"]))
            .await
            .unwrap();
        harness.spawn();

        harness.wait_until(|h| h.projection.len() == 1).await;
        assert!(!harness.projection.find(&key).unwrap().liked_by_viewer);

        // 登录 u2：无需存储推送，liked-by-me 翻转
        harness.identity.sign_in(Viewer::new("u2", "u2"));
        harness
            .wait_until(|h| {
                h.projection
                    .find(&key)
                    .map(|v| v.liked_by_viewer)
                    .unwrap_or(false)
            })
            .await;
    }

    #[tokio::test]
    async fn test_sign_in_and_out_notices() {
        let harness = Harness::new(StaticIdentityProvider::anonymous());
        let mut notice_rx = harness.notices.subscribe();
        harness.spawn();
        // 让 worker 先跑到 select 循环，登录变更才会被观察到
        tokio::task::yield_now().await;

        harness.identity.sign_in(Viewer::new("u1", "Doro"));
        let notice = tokio::time::timeout(Duration::from_secs(2), notice_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(notice, Notice::SignedIn { display_name } if display_name == "Doro"));

        harness.identity.sign_out();
        let notice = tokio::time::timeout(Duration::from_secs(2), notice_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(notice, Notice::SignedOut));
    }

    #[tokio::test]
    async fn test_concurrent_delete_evicts_reader_with_notice() {
        let harness = Harness::new(StaticIdentityProvider::anonymous());
        let key = harness.store.push(&record("u1", "A", &[])).await.unwrap();
        harness.spawn();
        harness.wait_until(|h| h.projection.len() == 1).await;

        harness.navigator.open_reader(key.clone());
        let mut notice_rx = harness.notices.subscribe();

        // 另一个参与者删除了正在阅读的记录
        harness.store.remove(&key).await.unwrap();
        harness
            .wait_until(|h| h.navigator.screen().is_listing())
            .await;

        let notice = tokio::time::timeout(Duration::from_secs(2), notice_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(notice, Notice::SelectionRemoved { key: k } if k == key));
    }

    #[tokio::test]
    async fn test_projection_empty_for_empty_collection() {
        let harness = Harness::new(StaticIdentityProvider::anonymous());
        harness.spawn();

        // 空集合投影为空序列，而不是错误；随后第一条记录出现
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(harness.projection.is_empty());

        harness.store.push(&record("u1", "A", &[])).await.unwrap();
        harness.wait_until(|h| h.projection.len() == 1).await;
    }
}
