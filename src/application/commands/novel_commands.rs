//! Novel Commands

use crate::domain::novel::NovelKey;

/// 发布或更新小说命令
///
/// existing_key 为 Some 时是编辑：整条重写但必须带回已有 likes，
/// 并保留原 created_at
#[derive(Debug, Clone)]
pub struct PublishNovel {
    pub title: String,
    pub chapters: Vec<String>,
    pub cover_image: String,
    pub existing_key: Option<NovelKey>,
}

/// 删除小说命令
///
/// 交互式确认是调用方的职责；到达这里即执行
#[derive(Debug, Clone)]
pub struct DeleteNovel {
    pub key: NovelKey,
}

/// 分享小说命令
#[derive(Debug, Clone)]
pub struct ShareNovel {
    pub key: NovelKey,
}

/// 上传封面图命令
#[derive(Debug, Clone)]
pub struct UploadCoverImage {
    pub data: Vec<u8>,
    pub content_type: String,
}
