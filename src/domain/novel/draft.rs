//! Novel Context - 创作草稿
//!
//! 发布/编辑表单的缓冲内容及其校验。校验失败时不产生任何存储写入。

use super::{NovelError, NovelKey, StoredChapter, Title};

/// 创作缓冲区
///
/// existing_key 为 Some 时表示编辑已有记录，否则为新建
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NovelDraft {
    pub existing_key: Option<NovelKey>,
    pub title: String,
    pub chapters: Vec<String>,
    pub cover_image: String,
}

impl NovelDraft {
    /// 新建草稿（单个空章节起步）
    pub fn blank() -> Self {
        Self {
            chapters: vec![String::new()],
            ..Default::default()
        }
    }

    /// 校验草稿
    ///
    /// 规则:
    /// - 标题去空白后非空
    /// - 至少一个章节，且至少一个章节去空白后非空
    ///   （非空章节之间夹杂空白章节是允许的）
    pub fn validate(&self) -> Result<ValidatedDraft, NovelError> {
        let title =
            Title::new(self.title.clone()).map_err(|e| NovelError::InvalidTitle(e.to_string()))?;

        if self.chapters.is_empty() {
            return Err(NovelError::NoChapters);
        }
        if !self.chapters.iter().any(|c| !c.trim().is_empty()) {
            return Err(NovelError::AllChaptersBlank);
        }

        let chapters = self
            .chapters
            .iter()
            .map(|c| StoredChapter::new(c.trim()))
            .collect();

        Ok(ValidatedDraft {
            title,
            chapters,
            cover_image: self.cover_image.trim().to_string(),
        })
    }
}

/// 校验通过的草稿内容
#[derive(Debug, Clone)]
pub struct ValidatedDraft {
    pub title: Title,
    pub chapters: Vec<StoredChapter>,
    pub cover_image: String,
}
