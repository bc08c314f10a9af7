//! Collection Projector - 投影集
//!
//! 持有当前全量、归一化、已排序的视图记录集。每次订阅推送到来时
//! 以当时已知的观看者身份重新归一化每条记录，按 created_at 降序排序，
//! 并整体原子替换——读取方永远不会观察到半更新状态。

use std::sync::{Arc, RwLock};

use crate::domain::novel::{CollectionSnapshot, NovelKey, NovelView, UserId};

/// 投影集
///
/// 重投影是纯的、幂等的、可随时重算的；过滤从不修改投影集本身
pub struct NovelProjection {
    views: RwLock<Arc<Vec<NovelView>>>,
}

impl NovelProjection {
    pub fn new() -> Self {
        Self {
            views: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 全量重投影并原子替换
    ///
    /// 排序键只有 created_at（降序）；稳定排序使同刻记录保持
    /// 存储端报告的 key 顺序。空集合投影为空序列，不是错误。
    pub fn apply(&self, snapshot: &CollectionSnapshot, viewer: Option<&UserId>) {
        let mut views: Vec<NovelView> = snapshot
            .iter()
            .map(|(key, stored)| NovelView::project(key.clone(), stored, viewer))
            .collect();
        views.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        *self.views.write().unwrap() = Arc::new(views);
    }

    /// 当前投影集（整体快照，调用方持有的引用不受后续替换影响）
    pub fn current(&self) -> Arc<Vec<NovelView>> {
        self.views.read().unwrap().clone()
    }

    pub fn find(&self, key: &NovelKey) -> Option<NovelView> {
        self.current().iter().find(|v| v.key == *key).cloned()
    }

    pub fn contains(&self, key: &NovelKey) -> bool {
        self.current().iter().any(|v| v.key == *key)
    }

    /// 大小写不敏感的子串过滤（标题或作者名）
    ///
    /// 每次按键重算；纯派生视图，不触碰投影集
    pub fn filter(&self, query: &str) -> Vec<NovelView> {
        let query_lower = query.to_lowercase();
        self.current()
            .iter()
            .filter(|v| v.matches(&query_lower))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }
}

impl Default for NovelProjection {
    fn default() -> Self {
        Self::new()
    }
}
