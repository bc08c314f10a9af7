//! Collection Store Port - 远程反应式集合存储
//!
//! 定义对远程集合存储的抽象接口（订阅/读/写原语）。
//! 存储的复制与持久化保证不在本工程范围内，具体实现在 infrastructure 层。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::novel::{CollectionSnapshot, NovelKey, StoredNovel, UserId};

/// Store 错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Collection Store Port
///
/// 写入原语分两类:
/// - 整条写（write_whole / push / remove）：原子替换或删除一条记录的全部字段
/// - 单键写（set_like / remove_like）：只触碰 likes 映射中自己的那一个 key，
///   避免覆盖其他观看者的并发点赞
#[async_trait]
pub trait CollectionStorePort: Send + Sync {
    /// 订阅全量集合快照
    ///
    /// 推送式：订阅建立即携带当前状态，之后每次集合变更推送完整状态
    fn subscribe(&self) -> watch::Receiver<CollectionSnapshot>;

    /// 单次点读（编辑前的 likes 保留读取、分享解析用）
    async fn read_once(&self, key: &NovelKey) -> Result<Option<StoredNovel>, StoreError>;

    /// 整条替换一条记录
    async fn write_whole(&self, key: &NovelKey, record: &StoredNovel) -> Result<(), StoreError>;

    /// 在 likes 映射中写入观看者的存在标记
    async fn set_like(&self, key: &NovelKey, viewer: &UserId) -> Result<(), StoreError>;

    /// 从 likes 映射中移除观看者的存在标记
    async fn remove_like(&self, key: &NovelKey, viewer: &UserId) -> Result<(), StoreError>;

    /// 创建记录，key 由存储端分配
    async fn push(&self, record: &StoredNovel) -> Result<NovelKey, StoreError>;

    /// 整条删除（不可逆，无墓碑）
    async fn remove(&self, key: &NovelKey) -> Result<(), StoreError>;

    /// 读取整个集合（批量导出面）
    async fn read_all(&self) -> Result<CollectionSnapshot, StoreError>;

    /// 整集合覆盖（批量导入面，绕过常规变更路径）
    async fn replace_all(&self, snapshot: &CollectionSnapshot) -> Result<(), StoreError>;
}
