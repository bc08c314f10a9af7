//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 集合存储配置
    #[serde(default)]
    pub store: StoreConfig,

    /// 分享链接配置
    #[serde(default)]
    pub share: ShareConfig,

    /// 图床配置
    #[serde(default)]
    pub image_host: ImageHostConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            share: ShareConfig::default(),
            image_host: ImageHostConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 集合存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// 存储服务基础 URL
    #[serde(default = "default_store_url")]
    pub base_url: String,

    /// 集合路径
    #[serde(default = "default_collection")]
    pub collection: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,

    /// 订阅轮询间隔（毫秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

fn default_store_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_collection() -> String {
    "novels".to_string()
}

fn default_store_timeout() -> u64 {
    30
}

fn default_poll_interval() -> u64 {
    2000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_url(),
            collection: default_collection(),
            timeout_secs: default_store_timeout(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

/// 分享链接配置
#[derive(Debug, Clone, Deserialize)]
pub struct ShareConfig {
    /// 分享链接的公开基础地址
    #[serde(default = "default_share_base_url")]
    pub base_url: String,

    /// 本次会话的入口地址（可能携带分享 token），仅初始加载时解析一次
    #[serde(default)]
    pub entry_address: Option<String>,
}

fn default_share_base_url() -> String {
    "http://localhost:5173".to_string()
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_share_base_url(),
            entry_address: None,
        }
    }
}

/// 图床配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImageHostConfig {
    /// 上传接口 URL
    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_image_timeout")]
    pub timeout_secs: u64,
}

fn default_upload_url() -> String {
    "http://localhost:9100/upload".to_string()
}

fn default_image_timeout() -> u64 {
    60
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        Self {
            upload_url: default_upload_url(),
            timeout_secs: default_image_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
