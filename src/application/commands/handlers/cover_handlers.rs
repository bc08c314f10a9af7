//! Cover Command Handlers - 封面上传

use std::sync::Arc;

use crate::application::commands::UploadCoverImage;
use crate::application::error::ApplicationError;
use crate::application::ports::{ImageHostPort, NoticePort, MAX_IMAGE_BYTES};

/// 封面上传响应
#[derive(Debug, Clone)]
pub struct UploadCoverResponse {
    /// 可写入草稿封面缓冲区的引用 URL
    pub url: String,
}

/// UploadCoverImage Handler
///
/// 体积上限在传输之前检查，超限请求不会发出
pub struct UploadCoverHandler {
    image_host: Arc<dyn ImageHostPort>,
    notices: Arc<dyn NoticePort>,
}

impl UploadCoverHandler {
    pub fn new(image_host: Arc<dyn ImageHostPort>, notices: Arc<dyn NoticePort>) -> Self {
        Self {
            image_host,
            notices,
        }
    }

    pub async fn handle(
        &self,
        command: UploadCoverImage,
    ) -> Result<UploadCoverResponse, ApplicationError> {
        match self.execute(command).await {
            Ok(response) => {
                self.notices.success("Cover image uploaded");
                Ok(response)
            }
            Err(err) => {
                self.notices.error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        command: UploadCoverImage,
    ) -> Result<UploadCoverResponse, ApplicationError> {
        let size = command.data.len() as u64;
        if size > MAX_IMAGE_BYTES {
            return Err(ApplicationError::validation(format!(
                "cover image is {} bytes, limit is {} bytes",
                size, MAX_IMAGE_BYTES
            )));
        }

        let url = self
            .image_host
            .upload(command.data, &command.content_type)
            .await?;

        tracing::info!(size = size, url = %url, "Cover image uploaded");

        Ok(UploadCoverResponse { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::events::BroadcastNoticePublisher;
    use crate::infrastructure::memory::InMemoryImageHost;

    #[tokio::test]
    async fn test_upload_returns_reference_url() {
        let host = InMemoryImageHost::new().arc();
        let handler = UploadCoverHandler::new(host.clone(), BroadcastNoticePublisher::new().arc());

        let response = handler
            .handle(UploadCoverImage {
                data: vec![0u8; 16],
                content_type: "image/png".to_string(),
            })
            .await
            .unwrap();

        assert!(response.url.starts_with("memory://covers/"));
        assert_eq!(host.uploaded_count(), 1);
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected_before_transport() {
        let host = InMemoryImageHost::new().arc();
        let handler = UploadCoverHandler::new(host.clone(), BroadcastNoticePublisher::new().arc());

        let err = handler
            .handle(UploadCoverImage {
                data: vec![0u8; (MAX_IMAGE_BYTES + 1) as usize],
                content_type: "image/png".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Validation(_)));
        assert_eq!(host.uploaded_count(), 0);
    }
}
