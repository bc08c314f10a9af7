//! Novel Context - 存储记录
//!
//! 远程集合中一条记录的线上格式。字段名与存储端保持一致（camelCase），
//! 时间戳为毫秒级 epoch。

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NovelKey, UserId};

/// 章节 - 阅读分页单位
///
/// 不变量: chapters 顺序有意义，章节索引始终落在 [0, len - 1]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredChapter {
    pub content: String,
}

impl StoredChapter {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// 远程存储中的小说记录
///
/// 不变量:
/// - likes 只能按观看者 key 增删；整条重写（编辑）必须原样带回已有的 likes
/// - created_at 创建后不可变，是唯一的排序键（降序）
/// - updated_at 每次编辑重新盖章，不参与排序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredNovel {
    /// 发布者身份快照（写入时盖章，不与身份记录联查）
    pub author_id: UserId,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_photo: Option<String>,

    pub title: String,

    #[serde(default)]
    pub chapters: Vec<StoredChapter>,

    /// 旧版单正文字段（只读兼容，永不写回）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// 封面图 URL，空串表示无封面
    #[serde(default)]
    pub cover_image: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    /// 观看者身份 -> 存在标记；key 集合的基数即点赞数
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub likes: BTreeMap<UserId, bool>,
}

/// 全量集合快照
///
/// 订阅每次推送的都是集合的完整当前状态，不是增量
pub type CollectionSnapshot = BTreeMap<NovelKey, StoredNovel>;
