//! 应用层错误定义
//!
//! 统一的命令/查询错误类型。所有错误都在操作边界被捕获并转化为
//! 恰好一条用户可见通知，不向全局传播，也不自动重试。

use thiserror::Error;

use crate::domain::novel::{NovelError, NovelKey};

use super::ports::{ImageHostError, StoreError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 校验错误（不会产生任何存储写入）
    #[error("Validation error: {0}")]
    Validation(String),

    /// 操作需要已登录的观看者身份
    #[error("Sign-in required")]
    AuthRequired,

    /// 写入边界的作者校验失败
    #[error("Only the author may modify novel {0}")]
    OwnershipViolation(NovelKey),

    /// 资源未找到
    #[error("{resource_type} not found: {key}")]
    NotFound {
        resource_type: &'static str,
        key: String,
    },

    /// 存储读取失败
    #[error("Store read failed: {0}")]
    StoreRead(String),

    /// 存储写入失败
    #[error("Store write failed: {0}")]
    StoreWrite(String),

    /// 图床失败
    #[error("Image upload failed: {0}")]
    ImageHost(String),

    /// 导入文档格式错误
    #[error("Invalid import document: {0}")]
    ImportFormat(String),
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(resource_type: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource_type,
            key: key.to_string(),
        }
    }

    pub fn store_read(err: StoreError) -> Self {
        Self::StoreRead(err.to_string())
    }

    pub fn store_write(err: StoreError) -> Self {
        Self::StoreWrite(err.to_string())
    }

    pub fn import_format(message: impl Into<String>) -> Self {
        Self::ImportFormat(message.into())
    }
}

impl From<NovelError> for ApplicationError {
    fn from(err: NovelError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ImageHostError> for ApplicationError {
    fn from(err: ImageHostError) -> Self {
        Self::ImageHost(err.to_string())
    }
}
