//! Novel Context - 视图记录归一化
//!
//! 原始存储记录 + 当前观看者身份 -> 视图记录。纯函数，无副作用，无 I/O。
//! 派生字段只在归一化时计算，永不持久化。

use chrono::{DateTime, Utc};

use super::{NovelKey, StoredChapter, StoredNovel, UserId};

/// 视图记录
///
/// 在存储记录之上叠加观看者相关的派生字段（点赞数、是否已赞）
#[derive(Debug, Clone, PartialEq)]
pub struct NovelView {
    pub key: NovelKey,
    pub author_id: UserId,
    pub author_name: String,
    pub author_photo: Option<String>,
    pub title: String,
    pub chapters: Vec<StoredChapter>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// likes 映射 key 集合的基数
    pub like_count: usize,
    /// 当前观看者已知且是 likes 的 key 之一
    pub liked_by_viewer: bool,
}

impl NovelView {
    /// 归一化一条原始记录
    ///
    /// 规则:
    /// - likes 缺失 => like_count = 0 且 liked_by_viewer = false
    /// - chapters 缺失时以旧版 content 正文回退为单章节（只读兼容）
    /// - 空串封面归一化为 None
    /// - updated_at 缺失时回退到 created_at
    pub fn project(key: NovelKey, stored: &StoredNovel, viewer: Option<&UserId>) -> Self {
        let chapters = if stored.chapters.is_empty() {
            match &stored.content {
                Some(content) if !content.is_empty() => vec![StoredChapter::new(content.clone())],
                _ => Vec::new(),
            }
        } else {
            stored.chapters.clone()
        };

        let liked_by_viewer = match viewer {
            Some(id) => stored.likes.contains_key(id),
            None => false,
        };

        Self {
            key,
            author_id: stored.author_id.clone(),
            author_name: stored.author_name.clone(),
            author_photo: stored.author_photo.clone(),
            title: stored.title.clone(),
            chapters,
            cover_image: if stored.cover_image.is_empty() {
                None
            } else {
                Some(stored.cover_image.clone())
            },
            created_at: stored.created_at,
            updated_at: stored.updated_at.unwrap_or(stored.created_at),
            like_count: stored.likes.len(),
            liked_by_viewer,
        }
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// 观看者是否为该记录的作者
    pub fn authored_by(&self, viewer: &UserId) -> bool {
        self.author_id == *viewer
    }

    /// 标题或作者名的大小写不敏感子串匹配
    pub fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.author_name.to_lowercase().contains(query_lower)
    }
}
