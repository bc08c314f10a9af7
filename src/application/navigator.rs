//! Navigator - 跨任务共享的界面状态
//!
//! 在 Screen 状态机之上提供互斥访问，并在每次投影替换后
//! 对照投影集校正状态（选中记录被他人删除时退回列表）。

use std::sync::Mutex;

use crate::domain::navigation::Screen;
use crate::domain::novel::{NovelDraft, NovelKey, NovelView};

use super::projection::NovelProjection;

/// 对照投影集校正后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// 状态无需调整
    Unchanged,
    /// 阅读章节索引被钳回缩短后的章节范围
    ChapterClamped,
    /// 选中的记录已从集合中消失，退回列表
    EvictedToListing(NovelKey),
}

/// 界面状态持有者
pub struct Navigator {
    screen: Mutex<Screen>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            screen: Mutex::new(Screen::Listing),
        }
    }

    pub fn arc(self) -> std::sync::Arc<Self> {
        std::sync::Arc::new(self)
    }

    /// 当前界面状态快照
    pub fn screen(&self) -> Screen {
        self.screen.lock().unwrap().clone()
    }

    /// 选中小说进入阅读（章节索引重置为 0）
    pub fn open_reader(&self, key: NovelKey) {
        self.screen.lock().unwrap().open_reader(key);
        tracing::debug!("Navigation: reading");
    }

    /// 新建创作
    pub fn begin_create(&self) {
        self.screen.lock().unwrap().begin_compose(NovelDraft::blank());
        tracing::debug!("Navigation: composing (create)");
    }

    /// 编辑已有记录，草稿从视图记录预填
    pub fn begin_edit(&self, view: &NovelView) {
        let draft = NovelDraft {
            existing_key: Some(view.key.clone()),
            title: view.title.clone(),
            chapters: view.chapters.iter().map(|c| c.content.clone()).collect(),
            cover_image: view.cover_image.clone().unwrap_or_default(),
        };
        self.screen.lock().unwrap().begin_compose(draft);
        tracing::debug!(key = %view.key, "Navigation: composing (edit)");
    }

    /// 修改创作缓冲区；不在创作状态时为空操作
    pub fn edit_draft(&self, edit: impl FnOnce(&mut NovelDraft)) {
        if let Screen::Composing { draft } = &mut *self.screen.lock().unwrap() {
            edit(draft);
        }
    }

    /// 提交成功后清空创作缓冲区并返回列表
    pub fn finish_compose(&self) {
        self.screen.lock().unwrap().back_to_listing();
        tracing::debug!("Navigation: compose finished");
    }

    /// 取消创作
    pub fn cancel_compose(&self) {
        self.screen.lock().unwrap().back_to_listing();
    }

    pub fn back_to_listing(&self) {
        self.screen.lock().unwrap().back_to_listing();
    }

    /// 下一章（末章时空操作）
    pub fn next_chapter(&self, chapter_count: usize) {
        self.screen.lock().unwrap().next_chapter(chapter_count);
    }

    /// 上一章（第 0 章时空操作）
    pub fn prev_chapter(&self) {
        self.screen.lock().unwrap().prev_chapter();
    }

    /// 对照当前投影集校正状态
    ///
    /// 每次投影替换后调用：
    /// - 选中记录已消失 -> 退回列表（创作中未保存的编辑草稿一并丢弃）
    /// - 阅读索引超出缩短后的章节数 -> 钳回末章
    pub fn reconcile(&self, projection: &NovelProjection) -> Reconciliation {
        let mut screen = self.screen.lock().unwrap();

        let Some(key) = screen.selected_key().cloned() else {
            return Reconciliation::Unchanged;
        };

        match projection.find(&key) {
            None => {
                screen.back_to_listing();
                tracing::info!(key = %key, "Selected novel disappeared, back to listing");
                Reconciliation::EvictedToListing(key)
            }
            Some(view) => {
                if screen.clamp_chapter(view.chapter_count()) {
                    tracing::debug!(key = %key, "Chapter index clamped");
                    Reconciliation::ChapterClamped
                } else {
                    Reconciliation::Unchanged
                }
            }
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
