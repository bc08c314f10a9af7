//! Like Commands

use crate::domain::novel::NovelKey;

/// 点赞/取消点赞命令
///
/// 以最近一次投影中的 liked_by_viewer 为准发出恰好一次单键写；
/// 对可能过期的本地状态持乐观态度，下一次全量推送会自我纠正
#[derive(Debug, Clone)]
pub struct ToggleLike {
    pub key: NovelKey,
}
