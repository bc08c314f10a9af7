//! Notice Publisher Implementation
//!
//! 全局广播通道的通知发布实现；toast 呈现方订阅后自行渲染

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::application::ports::{Notice, NoticePort};

/// 广播通知发布器
pub struct BroadcastNoticePublisher {
    channel: broadcast::Sender<Notice>,
}

impl BroadcastNoticePublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅通知流
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.channel.subscribe()
    }
}

impl NoticePort for BroadcastNoticePublisher {
    fn publish(&self, notice: Notice) {
        if let Err(e) = self.channel.send(notice) {
            tracing::debug!(error = %e, "Failed to publish notice (no receivers)");
        }
    }
}

impl Default for BroadcastNoticePublisher {
    fn default() -> Self {
        Self::new()
    }
}
