//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `NOVERSE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `NOVERSE_STORE__BASE_URL=https://store.example.com`
/// - `NOVERSE_STORE__COLLECTION=novels`
/// - `NOVERSE_SHARE__BASE_URL=https://noverse.app`
/// - `NOVERSE_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("store.base_url", "http://localhost:9000")?
        .set_default("store.collection", "novels")?
        .set_default("store.timeout_secs", 30)?
        .set_default("store.poll_interval_ms", 2000)?
        .set_default("share.base_url", "http://localhost:5173")?
        .set_default("image_host.upload_url", "http://localhost:9100/upload")?
        .set_default("image_host.timeout_secs", 60)?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: NOVERSE_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("NOVERSE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.store.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Store base URL cannot be empty".to_string(),
        ));
    }

    if config.store.collection.is_empty() {
        return Err(ConfigError::ValidationError(
            "Store collection cannot be empty".to_string(),
        ));
    }

    if config.store.poll_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Store poll interval cannot be 0".to_string(),
        ));
    }

    if config.share.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Share base URL cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Store: {}", config.store.base_url);
    tracing::info!("Collection: {}", config.store.collection);
    tracing::info!("Poll Interval: {}ms", config.store.poll_interval_ms);
    tracing::info!("Share Base URL: {}", config.share.base_url);
    if let Some(entry) = &config.share.entry_address {
        tracing::info!("Entry Address: {}", entry);
    }
    tracing::info!("Image Host: {}", config.image_host.upload_url);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.store.base_url, "http://localhost:9000");
        assert_eq!(config.store.poll_interval_ms, 2000);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_store_url() {
        let mut config = AppConfig::default();
        config.store.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_collection() {
        let mut config = AppConfig::default();
        config.store.collection = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_poll_interval() {
        let mut config = AppConfig::default();
        config.store.poll_interval_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[store]\nbase_url = \"https://store.example.com\"\n\n[share]\nbase_url = \"https://noverse.app\""
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.store.base_url, "https://store.example.com");
        assert_eq!(config.share.base_url, "https://noverse.app");
        // 未覆盖的字段保持默认值
        assert_eq!(config.store.collection, "novels");
    }
}
