//! Notice Port - 用户可见通知
//!
//! 每次尝试的操作最多产生一条通知；toast 呈现由外部协作者负责

use serde::{Deserialize, Serialize};

use crate::domain::novel::NovelKey;

/// 通知事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum Notice {
    /// 操作成功
    Success { message: String },
    /// 操作失败
    Error { message: String },
    /// 观看者登录
    SignedIn { display_name: String },
    /// 观看者登出
    SignedOut,
    /// 当前阅读/编辑中的记录被其他人删除，已退回列表
    SelectionRemoved { key: NovelKey },
}

/// Notice Port
pub trait NoticePort: Send + Sync {
    /// 发布一条通知
    fn publish(&self, notice: Notice);

    /// 发布成功通知
    fn success(&self, message: &str) {
        self.publish(Notice::Success {
            message: message.to_string(),
        });
    }

    /// 发布失败通知
    fn error(&self, message: &str) {
        self.publish(Notice::Error {
            message: message.to_string(),
        });
    }
}
