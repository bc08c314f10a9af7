//! Share Resolution - 分享链接的构造与解析
//!
//! 出站：基础地址 + ?novel=<key> 的查询 token（key 原样携带）。
//! 入站：仅在初始加载时解析一次入口地址；token 命中则以一次点读
//! 预置阅读状态，在订阅的首次推送到达之前生效；token 指向不存在的
//! 记录时静默忽略，停留在列表。

use std::sync::Arc;

use crate::domain::novel::NovelKey;

use super::navigator::Navigator;
use super::ports::{CollectionStorePort, NoticePort};

/// 分享链接的查询参数名
pub const SHARE_QUERY_KEY: &str = "novel";

/// 分享链接构造器
#[derive(Debug, Clone)]
pub struct ShareLinkBuilder {
    base_url: String,
}

impl ShareLinkBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// 纯派生，无存储交互
    pub fn link_for(&self, key: &NovelKey) -> String {
        format!("{}/?{}={}", self.base_url, SHARE_QUERY_KEY, key)
    }
}

/// 从入口地址提取分享 token
pub fn extract_share_token(address: &str) -> Option<NovelKey> {
    let (_, query) = address.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);

    for pair in query.split('&') {
        if let Some((name, value)) = pair.split_once('=') {
            if name == SHARE_QUERY_KEY && !value.is_empty() {
                return Some(NovelKey::new(value));
            }
        }
    }
    None
}

/// 入口分享解析
pub struct ShareResolver {
    store: Arc<dyn CollectionStorePort>,
    navigator: Arc<Navigator>,
    notices: Arc<dyn NoticePort>,
}

impl ShareResolver {
    pub fn new(
        store: Arc<dyn CollectionStorePort>,
        navigator: Arc<Navigator>,
        notices: Arc<dyn NoticePort>,
    ) -> Self {
        Self {
            store,
            navigator,
            notices,
        }
    }

    /// 解析入口地址（仅初始加载调用一次）
    pub async fn resolve_entry(&self, address: &str) {
        let Some(key) = extract_share_token(address) else {
            return;
        };

        match self.store.read_once(&key).await {
            Ok(Some(_)) => {
                tracing::info!(key = %key, "Share token resolved, seeding reader");
                self.navigator.open_reader(key);
            }
            Ok(None) => {
                // token 指向不存在的记录：静默忽略，停留在列表
                tracing::debug!(key = %key, "Share token refers to unknown novel, ignored");
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Share resolution read failed");
                self.notices.error(&format!("Failed to open shared novel: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_for_embeds_key_verbatim() {
        let links = ShareLinkBuilder::new("https://noverse.app/");
        assert_eq!(
            links.link_for(&NovelKey::new("-Nabc123")),
            "https://noverse.app/?novel=-Nabc123"
        );
    }

    #[test]
    fn test_extract_token_from_address() {
        let key = extract_share_token("https://noverse.app/?novel=-Nabc123");
        assert_eq!(key, Some(NovelKey::new("-Nabc123")));
    }

    #[test]
    fn test_extract_token_among_other_params() {
        let key = extract_share_token("https://noverse.app/?utm=x&novel=k1&lang=zh");
        assert_eq!(key, Some(NovelKey::new("k1")));
    }

    #[test]
    fn test_extract_token_ignores_fragment() {
        let key = extract_share_token("https://noverse.app/?novel=k1#top");
        assert_eq!(key, Some(NovelKey::new("k1")));
    }

    #[test]
    fn test_extract_token_absent() {
        assert_eq!(extract_share_token("https://noverse.app/"), None);
        assert_eq!(extract_share_token("https://noverse.app/?other=1"), None);
        assert_eq!(extract_share_token("https://noverse.app/?novel="), None);
    }

    mod resolver {
        use super::*;
        use crate::domain::novel::{StoredChapter, StoredNovel, UserId};
        use crate::infrastructure::events::BroadcastNoticePublisher;
        use crate::infrastructure::memory::InMemoryCollectionStore;
        use chrono::Utc;
        use std::collections::BTreeMap;

        fn record() -> StoredNovel {
            StoredNovel {
                author_id: UserId::new("u1"),
                author_name: "Doro".to_string(),
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

        fn make_resolver(
            store: std::sync::Arc<InMemoryCollectionStore>,
        ) -> (ShareResolver, Arc<Navigator>) {
            let navigator = Navigator::new().arc();
            let resolver = ShareResolver::new(
                store,
                navigator.clone(),
                BroadcastNoticePublisher::new().arc(),
            );
            (resolver, navigator)
        }

        #[tokio::test]
        async fn test_unknown_token_leaves_listing() {
            let store = InMemoryCollectionStore::new().arc();
            let (resolver, navigator) = make_resolver(store);

            resolver
                .resolve_entry("https://noverse.app/?novel=missing")
                .await;
            assert!(navigator.screen().is_listing());
        }

        #[tokio::test]
        async fn test_known_token_seeds_reader_at_chapter_zero() {
            use crate::domain::navigation::Screen;

            let store = InMemoryCollectionStore::new().arc();
            let key = store.push(&record()).await.unwrap();
            let (resolver, navigator) = make_resolver(store);

            resolver
                .resolve_entry(&format!("https://noverse.app/?novel={}", key))
                .await;
            assert_eq!(
                navigator.screen(),
                Screen::Reading {
                    key,
                    chapter_index: 0
                }
            );
        }

        #[tokio::test]
        async fn test_address_without_token_is_ignored() {
            let store = InMemoryCollectionStore::new().arc();
            let (resolver, navigator) = make_resolver(store);

            resolver.resolve_entry("https://noverse.app/").await;
            assert!(navigator.screen().is_listing());
        }
    }
}
