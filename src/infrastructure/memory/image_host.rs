//! In-Memory Image Host - 测试与演示用的图床
//!
//! 始终接受上传并返回 memory:// 引用，不做实际传输

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{ImageHostError, ImageHostPort};

/// 内存图床
pub struct InMemoryImageHost {
    uploads: DashMap<String, Vec<u8>>,
}

impl InMemoryImageHost {
    pub fn new() -> Self {
        Self {
            uploads: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn uploaded_count(&self) -> usize {
        self.uploads.len()
    }
}

impl Default for InMemoryImageHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageHostPort for InMemoryImageHost {
    async fn upload(&self, data: Vec<u8>, content_type: &str) -> Result<String, ImageHostError> {
        let url = format!("memory://covers/{}", Uuid::new_v4());
        tracing::debug!(
            url = %url,
            size = data.len(),
            content_type = %content_type,
            "InMemoryImageHost: upload accepted"
        );
        self.uploads.insert(url.clone(), data);
        Ok(url)
    }
}
