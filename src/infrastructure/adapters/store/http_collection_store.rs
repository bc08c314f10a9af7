//! HTTP Collection Store - 调用远程集合存储的 REST 接口
//!
//! 实现 CollectionStorePort trait，按路径式 REST 约定访问远程存储:
//!
//! GET/PUT/DELETE {base}/{collection}/{key}.json        单条记录
//! PUT/DELETE     {base}/{collection}/{key}/likes/{uid}.json  单键点赞
//! POST           {base}/{collection}.json -> {"name": key}   创建
//! GET/PUT        {base}/{collection}.json                    整集合
//!
//! 订阅通过轮询实现：后台任务定期读取整集合，内容变化时
//! 推送完整快照（全量替换语义）。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::ports::{CollectionStorePort, StoreError};
use crate::domain::novel::{CollectionSnapshot, NovelKey, StoredNovel, UserId};

/// 创建响应（存储端分配的 key）
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

/// HTTP 集合存储配置
#[derive(Debug, Clone)]
pub struct HttpCollectionStoreConfig {
    /// 存储服务基础 URL
    pub base_url: String,
    /// 集合路径
    pub collection: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 订阅轮询间隔（毫秒）
    pub poll_interval_ms: u64,
}

impl Default for HttpCollectionStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            collection: "novels".to_string(),
            timeout_secs: 30,
            poll_interval_ms: 2000,
        }
    }
}

impl HttpCollectionStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

/// HTTP 集合存储客户端
pub struct HttpCollectionStore {
    client: Client,
    config: HttpCollectionStoreConfig,
    snapshot_tx: watch::Sender<CollectionSnapshot>,
}

impl HttpCollectionStore {
    /// 创建新的 HTTP 集合存储客户端
    pub fn new(config: HttpCollectionStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let (tx, _) = watch::channel(CollectionSnapshot::new());

        Ok(Self {
            client,
            config,
            snapshot_tx: tx,
        })
    }

    /// 启动订阅轮询任务
    ///
    /// 必须在 tokio 运行时内调用；subscribe 返回的接收端在此之后才会有推送
    pub fn spawn_poller(self: Arc<Self>) -> JoinHandle<()> {
        let store = self;
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_millis(store.config.poll_interval_ms));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::info!(
                interval_ms = store.config.poll_interval_ms,
                "Collection poller started"
            );

            loop {
                interval.tick().await;
                match store.read_all().await {
                    Ok(snapshot) => {
                        let changed = *store.snapshot_tx.borrow() != snapshot;
                        if changed {
                            tracing::debug!(records = snapshot.len(), "Collection changed");
                            store.snapshot_tx.send_replace(snapshot);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Collection poll failed");
                    }
                }
            }
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}.json", self.config.base_url, self.config.collection)
    }

    fn record_url(&self, key: &NovelKey) -> String {
        format!(
            "{}/{}/{}.json",
            self.config.base_url, self.config.collection, key
        )
    }

    fn like_url(&self, key: &NovelKey, viewer: &UserId) -> String {
        format!(
            "{}/{}/{}/likes/{}.json",
            self.config.base_url, self.config.collection, key, viewer
        )
    }

    fn map_request_error(e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout
        } else if e.is_connect() {
            StoreError::NetworkError(format!("Cannot connect to collection store: {}", e))
        } else {
            StoreError::NetworkError(e.to_string())
        }
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::BackendError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl CollectionStorePort for HttpCollectionStore {
    fn subscribe(&self) -> watch::Receiver<CollectionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    async fn read_once(&self, key: &NovelKey) -> Result<Option<StoredNovel>, StoreError> {
        let response = self
            .client
            .get(self.record_url(key))
            .send()
            .await
            .map_err(Self::map_request_error)?;

        // 缺失的 key 返回 null 体
        Self::ensure_success(response)
            .await?
            .json::<Option<StoredNovel>>()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }

    async fn write_whole(&self, key: &NovelKey, record: &StoredNovel) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.record_url(key))
            .json(record)
            .send()
            .await
            .map_err(Self::map_request_error)?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn set_like(&self, key: &NovelKey, viewer: &UserId) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.like_url(key, viewer))
            .json(&true)
            .send()
            .await
            .map_err(Self::map_request_error)?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn remove_like(&self, key: &NovelKey, viewer: &UserId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.like_url(key, viewer))
            .send()
            .await
            .map_err(Self::map_request_error)?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn push(&self, record: &StoredNovel) -> Result<NovelKey, StoreError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(record)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        let push: PushResponse = Self::ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        tracing::debug!(key = %push.name, "Record created");
        Ok(NovelKey::new(push.name))
    }

    async fn remove(&self, key: &NovelKey) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.record_url(key))
            .send()
            .await
            .map_err(Self::map_request_error)?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn read_all(&self) -> Result<CollectionSnapshot, StoreError> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(Self::map_request_error)?;

        // 空集合返回 null 体
        let snapshot: Option<CollectionSnapshot> = Self::ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        Ok(snapshot.unwrap_or_default())
    }

    async fn replace_all(&self, snapshot: &CollectionSnapshot) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.collection_url())
            .json(snapshot)
            .send()
            .await
            .map_err(Self::map_request_error)?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpCollectionStoreConfig::default();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.collection, "novels");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpCollectionStoreConfig::new("http://store:9000").with_collection("drafts");
        assert_eq!(config.base_url, "http://store:9000");
        assert_eq!(config.collection, "drafts");
    }

    #[test]
    fn test_url_shapes() {
        let store = HttpCollectionStore::new(HttpCollectionStoreConfig::default()).unwrap();
        assert_eq!(store.collection_url(), "http://localhost:9000/novels.json");
        assert_eq!(
            store.record_url(&NovelKey::new("k1")),
            "http://localhost:9000/novels/k1.json"
        );
        assert_eq!(
            store.like_url(&NovelKey::new("k1"), &UserId::new("u1")),
            "http://localhost:9000/novels/k1/likes/u1.json"
        );
    }
}
