//! Novel Queries

use crate::domain::novel::NovelKey;

/// 浏览小说列表
///
/// filter 为客户端谓词过滤（标题或作者名的大小写不敏感子串），
/// 每次按键重算
#[derive(Debug, Clone, Default)]
pub struct BrowseNovels {
    pub filter: Option<String>,
}

/// 查看单本小说
#[derive(Debug, Clone)]
pub struct GetNovel {
    pub key: NovelKey,
}

/// 我发布的小说
#[derive(Debug, Clone)]
pub struct MyNovels;
