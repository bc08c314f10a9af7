//! Identity Provider Port - 观看者身份
//!
//! 身份的签发与注销由外部协作者负责，这里只消费当前身份及其变更通知

use tokio::sync::watch;

use crate::domain::novel::UserId;

/// 当前观看者身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: UserId,
    pub display_name: String,
    pub photo_url: Option<String>,
}

impl Viewer {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            display_name: display_name.into(),
            photo_url: None,
        }
    }

    pub fn with_photo(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }
}

/// Identity Provider Port
pub trait IdentityProviderPort: Send + Sync {
    /// 当前身份，None 表示匿名
    fn current(&self) -> Option<Viewer>;

    /// 身份变更通知（登录/登出）
    fn watch(&self) -> watch::Receiver<Option<Viewer>>;
}
