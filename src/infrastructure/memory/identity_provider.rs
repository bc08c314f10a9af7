//! Static Identity Provider - 测试与演示用的身份提供者
//!
//! 通过 watch 通道模拟登录/登出变更通知

use std::sync::Arc;

use tokio::sync::watch;

use crate::application::ports::{IdentityProviderPort, Viewer};

/// 静态身份提供者
pub struct StaticIdentityProvider {
    viewer_tx: watch::Sender<Option<Viewer>>,
}

impl StaticIdentityProvider {
    /// 以匿名身份启动
    pub fn anonymous() -> Self {
        let (tx, _) = watch::channel(None);
        Self { viewer_tx: tx }
    }

    /// 以已登录身份启动
    pub fn signed_in(viewer: Viewer) -> Self {
        let (tx, _) = watch::channel(Some(viewer));
        Self { viewer_tx: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 模拟登录
    pub fn sign_in(&self, viewer: Viewer) {
        tracing::info!(id = %viewer.id, "Viewer signed in");
        self.viewer_tx.send_replace(Some(viewer));
    }

    /// 模拟登出
    pub fn sign_out(&self) {
        tracing::info!("Viewer signed out");
        self.viewer_tx.send_replace(None);
    }
}

impl IdentityProviderPort for StaticIdentityProvider {
    fn current(&self) -> Option<Viewer> {
        self.viewer_tx.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<Option<Viewer>> {
        self.viewer_tx.subscribe()
    }
}
