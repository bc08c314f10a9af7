//! Navigation Context - Screen 状态机

use crate::domain::novel::{NovelDraft, NovelKey};

/// 界面状态
///
/// 状态转移由用户动作驱动:
/// - 选中小说 -> Reading（章节索引重置为 0）
/// - 返回 -> Listing
/// - 写作/编辑入口 -> Composing
/// - 提交或取消创作 -> Listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// 小说列表
    Listing,
    /// 创作中（新建或编辑，编辑时草稿携带记录 key）
    Composing { draft: NovelDraft },
    /// 阅读中
    Reading {
        key: NovelKey,
        chapter_index: usize,
    },
}

impl Screen {
    pub fn is_listing(&self) -> bool {
        matches!(self, Screen::Listing)
    }

    /// 当前选中的记录 key（阅读中的记录，或编辑中草稿指向的记录）
    pub fn selected_key(&self) -> Option<&NovelKey> {
        match self {
            Screen::Reading { key, .. } => Some(key),
            Screen::Composing { draft } => draft.existing_key.as_ref(),
            Screen::Listing => None,
        }
    }

    /// 进入阅读，章节索引重置为 0
    pub fn open_reader(&mut self, key: NovelKey) {
        *self = Screen::Reading {
            key,
            chapter_index: 0,
        };
    }

    pub fn begin_compose(&mut self, draft: NovelDraft) {
        *self = Screen::Composing { draft };
    }

    pub fn back_to_listing(&mut self) {
        *self = Screen::Listing;
    }

    /// 下一章；已在末章时为空操作
    pub fn next_chapter(&mut self, chapter_count: usize) {
        if let Screen::Reading { chapter_index, .. } = self {
            if *chapter_index + 1 < chapter_count {
                *chapter_index += 1;
            }
        }
    }

    /// 上一章；已在第 0 章时为空操作
    pub fn prev_chapter(&mut self) {
        if let Screen::Reading { chapter_index, .. } = self {
            *chapter_index = chapter_index.saturating_sub(1);
        }
    }

    /// 将章节索引钳制进 [0, chapter_count - 1]
    ///
    /// 返回 true 表示索引被调整过（记录在选中期间缩短了章节）
    pub fn clamp_chapter(&mut self, chapter_count: usize) -> bool {
        if let Screen::Reading { chapter_index, .. } = self {
            let max = chapter_count.saturating_sub(1);
            if *chapter_index > max {
                *chapter_index = max;
                return true;
            }
        }
        false
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(index: usize) -> Screen {
        reading_key("k", index)
    }

    fn reading_key(key: &str, index: usize) -> Screen {
        Screen::Reading {
            key: NovelKey::new(key),
            chapter_index: index,
        }
    }

    #[test]
    fn test_open_reader_resets_chapter_index() {
        let mut screen = reading(3);
        screen.open_reader(NovelKey::new("other"));
        assert_eq!(screen, reading_key("other", 0));
    }

    #[test]
    fn test_next_at_last_chapter_is_noop() {
        let mut screen = reading(2);
        screen.next_chapter(3);
        assert_eq!(screen, reading(2));
    }

    #[test]
    fn test_prev_at_first_chapter_is_noop() {
        let mut screen = reading(0);
        screen.prev_chapter();
        assert_eq!(screen, reading(0));
    }

    #[test]
    fn test_paging_within_bounds() {
        let mut screen = reading(0);
        screen.next_chapter(3);
        assert_eq!(screen, reading(1));
        screen.prev_chapter();
        assert_eq!(screen, reading(0));
    }

    #[test]
    fn test_paging_ignored_outside_reading() {
        let mut screen = Screen::Listing;
        screen.next_chapter(3);
        screen.prev_chapter();
        assert!(screen.is_listing());
    }

    #[test]
    fn test_clamp_shrunken_chapter_list() {
        let mut screen = reading(4);
        assert!(screen.clamp_chapter(2));
        assert_eq!(screen, reading(1));
        assert!(!screen.clamp_chapter(2));
    }

    #[test]
    fn test_selected_key_for_edit_draft() {
        let mut screen = Screen::Listing;
        assert!(screen.selected_key().is_none());

        screen.begin_compose(NovelDraft {
            existing_key: Some(NovelKey::new("k")),
            ..NovelDraft::blank()
        });
        assert_eq!(screen.selected_key(), Some(&NovelKey::new("k")));

        screen.begin_compose(NovelDraft::blank());
        assert!(screen.selected_key().is_none());
    }
}
