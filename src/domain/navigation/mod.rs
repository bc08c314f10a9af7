//! Navigation Context - 界面状态机
//!
//! 职责:
//! - 当前界面状态（列表 / 创作 / 阅读）
//! - 阅读章节索引的钳制翻页

mod screen;

pub use screen::Screen;
