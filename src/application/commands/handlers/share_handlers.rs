//! Share Command Handlers - 分享链接

use std::sync::Arc;

use crate::application::commands::ShareNovel;
use crate::application::error::ApplicationError;
use crate::application::ports::{ClipboardPort, NoticePort};
use crate::application::share::ShareLinkBuilder;

/// 分享响应
#[derive(Debug, Clone)]
pub struct ShareNovelResponse {
    pub link: String,
}

/// ShareNovel Handler
///
/// 纯链接派生 + 剪贴板写入，无存储交互
pub struct ShareNovelHandler {
    links: ShareLinkBuilder,
    clipboard: Arc<dyn ClipboardPort>,
    notices: Arc<dyn NoticePort>,
}

impl ShareNovelHandler {
    pub fn new(
        links: ShareLinkBuilder,
        clipboard: Arc<dyn ClipboardPort>,
        notices: Arc<dyn NoticePort>,
    ) -> Self {
        Self {
            links,
            clipboard,
            notices,
        }
    }

    pub async fn handle(&self, command: ShareNovel) -> Result<ShareNovelResponse, ApplicationError> {
        let link = self.links.link_for(&command.key);
        self.clipboard.write_text(&link);

        tracing::debug!(key = %command.key, link = %link, "Share link copied");
        self.notices.success("Link copied to clipboard");

        Ok(ShareNovelResponse { link })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::NovelKey;
    use crate::infrastructure::events::BroadcastNoticePublisher;
    use crate::infrastructure::memory::InMemoryClipboard;

    #[tokio::test]
    async fn test_share_copies_link_with_key_token() {
        let clipboard = InMemoryClipboard::new().arc();
        let handler = ShareNovelHandler::new(
            ShareLinkBuilder::new("https://noverse.app"),
            clipboard.clone(),
            BroadcastNoticePublisher::new().arc(),
        );

        let response = handler
            .handle(ShareNovel {
                key: NovelKey::new("k1"),
            })
            .await
            .unwrap();

        assert_eq!(response.link, "https://noverse.app/?novel=k1");
        assert_eq!(clipboard.last_copied().as_deref(), Some("https://noverse.app/?novel=k1"));
    }
}
