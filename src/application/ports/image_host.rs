//! Image Host Port - 封面图托管
//!
//! 接收二进制图片并返回可访问的引用 URL；上传传输本身由外部协作者实现

use async_trait::async_trait;
use thiserror::Error;

/// 图床接受的最大图片体积
pub const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024;

/// Image Host 错误
#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Upload timeout")]
    Timeout,

    #[error("Host error: {0}")]
    HostError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Image Host Port
#[async_trait]
pub trait ImageHostPort: Send + Sync {
    /// 上传图片，返回可访问的引用 URL
    async fn upload(&self, data: Vec<u8>, content_type: &str) -> Result<String, ImageHostError>;
}
