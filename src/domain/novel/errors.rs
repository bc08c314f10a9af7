//! Novel Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NovelError {
    #[error("无效的标题: {0}")]
    InvalidTitle(String),

    #[error("至少需要一个章节")]
    NoChapters,

    #[error("所有章节内容均为空")]
    AllChaptersBlank,
}
