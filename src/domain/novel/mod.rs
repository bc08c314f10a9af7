//! Novel Context - 小说限界上下文
//!
//! 职责:
//! - 存储记录的线上格式（StoredNovel）
//! - 视图记录归一化（NovelView，纯函数）
//! - 创作草稿校验
//! - 值对象（NovelKey、UserId、Title）

mod draft;
mod errors;
mod record;
mod value_objects;
mod view;

pub use draft::{NovelDraft, ValidatedDraft};
pub use errors::NovelError;
pub use record::{CollectionSnapshot, StoredChapter, StoredNovel};
pub use value_objects::{NovelKey, Title, UserId};
pub use view::NovelView;
