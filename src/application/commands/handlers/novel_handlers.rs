//! Novel Command Handlers - 发布/更新与删除
//!
//! 变更协调器的整条写路径。每次尝试的操作恰好产生一条用户可见通知；
//! 失败不重试，失败的写不会改变投影集（等待下一次合法推送）。

use std::sync::Arc;

use chrono::Utc;

use crate::application::commands::{DeleteNovel, PublishNovel};
use crate::application::error::ApplicationError;
use crate::application::navigator::Navigator;
use crate::application::ports::{CollectionStorePort, IdentityProviderPort, NoticePort};
use crate::domain::novel::{NovelDraft, NovelKey, StoredNovel};

// ============================================================================
// PublishNovel
// ============================================================================

/// 发布/更新响应
#[derive(Debug, Clone)]
pub struct PublishNovelResponse {
    pub key: NovelKey,
    pub created: bool,
}

/// PublishNovel Handler
///
/// 编辑路径：先一次点读捕获已有 likes 与 created_at，再整条原子写回；
/// 作者校验在写入边界执行，不依赖界面入口的隐藏
pub struct PublishNovelHandler {
    store: Arc<dyn CollectionStorePort>,
    identity: Arc<dyn IdentityProviderPort>,
    navigator: Arc<Navigator>,
    notices: Arc<dyn NoticePort>,
}

impl PublishNovelHandler {
    pub fn new(
        store: Arc<dyn CollectionStorePort>,
        identity: Arc<dyn IdentityProviderPort>,
        navigator: Arc<Navigator>,
        notices: Arc<dyn NoticePort>,
    ) -> Self {
        Self {
            store,
            identity,
            navigator,
            notices,
        }
    }

    pub async fn handle(
        &self,
        command: PublishNovel,
    ) -> Result<PublishNovelResponse, ApplicationError> {
        match self.execute(command).await {
            Ok(response) => {
                // 成功后清空创作缓冲区并返回列表
                self.navigator.finish_compose();
                self.notices.success(if response.created {
                    "Novel posted successfully!"
                } else {
                    "Novel updated successfully!"
                });
                Ok(response)
            }
            Err(err) => {
                self.notices.error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        command: PublishNovel,
    ) -> Result<PublishNovelResponse, ApplicationError> {
        let viewer = self
            .identity
            .current()
            .ok_or(ApplicationError::AuthRequired)?;

        let draft = NovelDraft {
            existing_key: command.existing_key.clone(),
            title: command.title,
            chapters: command.chapters,
            cover_image: command.cover_image,
        };
        // 校验失败时不产生任何写入
        let valid = draft.validate()?;

        let now = Utc::now();

        if let Some(key) = command.existing_key {
            let stored = self
                .store
                .read_once(&key)
                .await
                .map_err(ApplicationError::store_read)?
                .ok_or_else(|| ApplicationError::not_found("Novel", &key))?;

            if stored.author_id != viewer.id {
                return Err(ApplicationError::OwnershipViolation(key));
            }

            let record = StoredNovel {
                // 作者快照从当前观看者重新盖章
                author_id: viewer.id,
                author_name: viewer.display_name,
                author_photo: viewer.photo_url,
                title: valid.title.into_string(),
                chapters: valid.chapters,
                content: None,
                cover_image: valid.cover_image,
                // created_at 不可变，仍是唯一排序键；编辑只刷新 updated_at
                created_at: stored.created_at,
                updated_at: Some(now),
                // 已有 likes 原样带回
                likes: stored.likes,
            };

            self.store
                .write_whole(&key, &record)
                .await
                .map_err(ApplicationError::store_write)?;

            tracing::info!(key = %key, title = %record.title, "Novel updated");

            Ok(PublishNovelResponse {
                key,
                created: false,
            })
        } else {
            let record = StoredNovel {
                author_id: viewer.id,
                author_name: viewer.display_name,
                author_photo: viewer.photo_url,
                title: valid.title.into_string(),
                chapters: valid.chapters,
                content: None,
                cover_image: valid.cover_image,
                created_at: now,
                updated_at: Some(now),
                likes: Default::default(),
            };

            let key = self
                .store
                .push(&record)
                .await
                .map_err(ApplicationError::store_write)?;

            tracing::info!(key = %key, title = %record.title, "Novel published");

            Ok(PublishNovelResponse { key, created: true })
        }
    }
}

// ============================================================================
// DeleteNovel
// ============================================================================

/// DeleteNovel Handler
///
/// 执行一次整键删除。作者校验同样在写入边界执行；
/// 删除已不存在的 key 视为成功（删除是幂等的）
pub struct DeleteNovelHandler {
    store: Arc<dyn CollectionStorePort>,
    identity: Arc<dyn IdentityProviderPort>,
    notices: Arc<dyn NoticePort>,
}

impl DeleteNovelHandler {
    pub fn new(
        store: Arc<dyn CollectionStorePort>,
        identity: Arc<dyn IdentityProviderPort>,
        notices: Arc<dyn NoticePort>,
    ) -> Self {
        Self {
            store,
            identity,
            notices,
        }
    }

    pub async fn handle(&self, command: DeleteNovel) -> Result<(), ApplicationError> {
        match self.execute(command).await {
            Ok(()) => {
                self.notices.success("Novel deleted");
                Ok(())
            }
            Err(err) => {
                self.notices.error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn execute(&self, command: DeleteNovel) -> Result<(), ApplicationError> {
        let viewer = self
            .identity
            .current()
            .ok_or(ApplicationError::AuthRequired)?;

        let key = command.key;

        match self
            .store
            .read_once(&key)
            .await
            .map_err(ApplicationError::store_read)?
        {
            None => {
                tracing::debug!(key = %key, "Novel already absent, delete is a no-op");
                Ok(())
            }
            Some(stored) if stored.author_id != viewer.id => {
                Err(ApplicationError::OwnershipViolation(key))
            }
            Some(_) => {
                self.store
                    .remove(&key)
                    .await
                    .map_err(ApplicationError::store_write)?;
                tracing::info!(key = %key, "Novel deleted");
                Ok(())
            }
        }
    }
}
