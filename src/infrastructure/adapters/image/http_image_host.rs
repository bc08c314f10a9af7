//! HTTP Image Host - 调用外部图床的上传接口
//!
//! 实现 ImageHostPort trait
//!
//! 外部图床 API:
//! POST {upload_url}  multipart/form-data, 字段 "file"
//! Response: {"url": "https://..."}  (JSON)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{ImageHostError, ImageHostPort};

/// 上传响应体
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// HTTP 图床配置
#[derive(Debug, Clone)]
pub struct HttpImageHostConfig {
    /// 上传接口 URL
    pub upload_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpImageHostConfig {
    fn default() -> Self {
        Self {
            upload_url: "http://localhost:9100/upload".to_string(),
            timeout_secs: 60,
        }
    }
}

/// HTTP 图床客户端
pub struct HttpImageHost {
    client: Client,
    config: HttpImageHostConfig,
}

impl HttpImageHost {
    /// 创建新的 HTTP 图床客户端
    pub fn new(config: HttpImageHostConfig) -> Result<Self, ImageHostError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ImageHostError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ImageHostPort for HttpImageHost {
    async fn upload(&self, data: Vec<u8>, content_type: &str) -> Result<String, ImageHostError> {
        let size = data.len();
        let part = Part::bytes(data)
            .file_name("cover")
            .mime_str(content_type)
            .map_err(|e| ImageHostError::InvalidResponse(format!("bad content type: {}", e)))?;
        let form = Form::new().part("file", part);

        tracing::debug!(
            url = %self.config.upload_url,
            size = size,
            content_type = %content_type,
            "Uploading cover image"
        );

        let response = self
            .client
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ImageHostError::Timeout
                } else if e.is_connect() {
                    ImageHostError::NetworkError(format!("Cannot connect to image host: {}", e))
                } else {
                    ImageHostError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ImageHostError::HostError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| ImageHostError::InvalidResponse(e.to_string()))?;

        tracing::info!(url = %upload.url, size = size, "Cover image hosted");
        Ok(upload.url)
    }
}
