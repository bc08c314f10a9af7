//! Like Command Handlers - 点赞翻转
//!
//! 单键写路径：只触碰 likes 映射中自己的那一个 key，
//! 避免覆盖其他观看者的并发点赞。

use std::sync::Arc;

use crate::application::commands::ToggleLike;
use crate::application::error::ApplicationError;
use crate::application::ports::{CollectionStorePort, IdentityProviderPort, NoticePort};
use crate::application::projection::NovelProjection;
use crate::domain::novel::NovelKey;

/// 点赞翻转响应
#[derive(Debug, Clone)]
pub struct ToggleLikeResponse {
    pub key: NovelKey,
    /// 本次写入后的目标状态
    pub liked: bool,
}

/// ToggleLike Handler
///
/// 以最近一次投影（而非新鲜点读）中的 liked_by_viewer 为准。
/// 下一次推送到来前的两次快速翻转彼此竞态，存储端 last-write-wins，
/// 本地视图在下一次全量推送时自我纠正。失败不重试。
pub struct ToggleLikeHandler {
    store: Arc<dyn CollectionStorePort>,
    identity: Arc<dyn IdentityProviderPort>,
    projection: Arc<NovelProjection>,
    notices: Arc<dyn NoticePort>,
}

impl ToggleLikeHandler {
    pub fn new(
        store: Arc<dyn CollectionStorePort>,
        identity: Arc<dyn IdentityProviderPort>,
        projection: Arc<NovelProjection>,
        notices: Arc<dyn NoticePort>,
    ) -> Self {
        Self {
            store,
            identity,
            projection,
            notices,
        }
    }

    pub async fn handle(&self, command: ToggleLike) -> Result<ToggleLikeResponse, ApplicationError> {
        match self.execute(command).await {
            // 点赞成功无 toast，界面由下一次推送更新
            Ok(response) => Ok(response),
            Err(ApplicationError::AuthRequired) => {
                self.notices.error("Please login to like novels");
                Err(ApplicationError::AuthRequired)
            }
            Err(err) => {
                self.notices.error("Failed to update like");
                Err(err)
            }
        }
    }

    async fn execute(&self, command: ToggleLike) -> Result<ToggleLikeResponse, ApplicationError> {
        let viewer = self
            .identity
            .current()
            .ok_or(ApplicationError::AuthRequired)?;

        let view = self
            .projection
            .find(&command.key)
            .ok_or_else(|| ApplicationError::not_found("Novel", &command.key))?;

        if view.liked_by_viewer {
            self.store
                .remove_like(&command.key, &viewer.id)
                .await
                .map_err(ApplicationError::store_write)?;
        } else {
            self.store
                .set_like(&command.key, &viewer.id)
                .await
                .map_err(ApplicationError::store_write)?;
        }

        tracing::debug!(
            key = %command.key,
            viewer = %viewer.id,
            liked = !view.liked_by_viewer,
            "Like toggled"
        );

        Ok(ToggleLikeResponse {
            key: command.key,
            liked: !view.liked_by_viewer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Viewer;
    use crate::domain::novel::{StoredChapter, StoredNovel, UserId};
    use crate::infrastructure::events::BroadcastNoticePublisher;
    use crate::infrastructure::memory::{InMemoryCollectionStore, StaticIdentityProvider};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn record(author: &str) -> StoredNovel {
        StoredNovel {
            author_id: UserId::new(author),
            author_name: author.to_string(),
            author_photo: None,
            title: "A".to_string(),
            chapters: vec![StoredChapter::new("hi")],
            content: None,
            cover_image: String::new(),
            created_at: Utc::now(),
            updated_at: None,
            likes: BTreeMap::new(),
        }
    }

    async fn harness(
        viewer: Option<&str>,
    ) -> (
        Arc<InMemoryCollectionStore>,
        Arc<NovelProjection>,
        ToggleLikeHandler,
        NovelKey,
    ) {
        let store = InMemoryCollectionStore::new().arc();
        let key = store.push(&record("u1")).await.unwrap();

        let projection = NovelProjection::new().arc();
        let viewer_id = viewer.map(UserId::new);
        projection.apply(&store.read_all().await.unwrap(), viewer_id.as_ref());

        let identity = match viewer {
            Some(id) => StaticIdentityProvider::signed_in(Viewer::new(id, id)),
            None => StaticIdentityProvider::anonymous(),
        }
        .arc();

        let handler = ToggleLikeHandler::new(
            store.clone(),
            identity,
            projection.clone(),
            BroadcastNoticePublisher::new().arc(),
        );
        (store, projection, handler, key)
    }

    #[tokio::test]
    async fn test_toggle_sets_presence_marker() {
        let (store, _, handler, key) = harness(Some("u2")).await;

        let response = handler.handle(ToggleLike { key: key.clone() }).await.unwrap();
        assert!(response.liked);

        let stored = store.read_once(&key).await.unwrap().unwrap();
        assert!(stored.likes.contains_key(&UserId::new("u2")));
        assert_eq!(stored.likes.len(), 1);
    }

    #[tokio::test]
    async fn test_double_toggle_restores_original_membership() {
        let (store, projection, handler, key) = harness(Some("u2")).await;

        handler.handle(ToggleLike { key: key.clone() }).await.unwrap();
        projection.apply(
            &store.read_all().await.unwrap(),
            Some(&UserId::new("u2")),
        );
        handler.handle(ToggleLike { key: key.clone() }).await.unwrap();

        let stored = store.read_once(&key).await.unwrap().unwrap();
        assert!(stored.likes.is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_toggle_rejected() {
        let (store, _, handler, key) = harness(None).await;

        let err = handler.handle(ToggleLike { key: key.clone() }).await.unwrap_err();
        assert!(matches!(err, ApplicationError::AuthRequired));
        assert!(store.read_once(&key).await.unwrap().unwrap().likes.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_unknown_key_reports_not_found() {
        let (_, _, handler, _) = harness(Some("u2")).await;

        let err = handler
            .handle(ToggleLike {
                key: NovelKey::new("missing"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_toggle_preserves_other_viewers_likes() {
        let (store, projection, handler, key) = harness(Some("u2")).await;
        store.set_like(&key, &UserId::new("u3")).await.unwrap();
        projection.apply(
            &store.read_all().await.unwrap(),
            Some(&UserId::new("u2")),
        );

        handler.handle(ToggleLike { key: key.clone() }).await.unwrap();

        let stored = store.read_once(&key).await.unwrap().unwrap();
        assert!(stored.likes.contains_key(&UserId::new("u2")));
        assert!(stored.likes.contains_key(&UserId::new("u3")));
    }
}
