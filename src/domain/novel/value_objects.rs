//! Novel Context - Value Objects

use serde::{Deserialize, Serialize};

/// 小说唯一标识
///
/// 由远程存储在创建时分配的不透明字符串 key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NovelKey(String);

impl NovelKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NovelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NovelKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// 观看者身份标识
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// 小说标题
///
/// 构造时去除首尾空白，空标题不可构造
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(title: impl Into<String>) -> Result<Self, &'static str> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err("标题不能为空");
        }
        if title.chars().count() > 200 {
            return Err("标题长度不能超过200字符");
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_trims_whitespace() {
        let title = Title::new("  第一部  ").unwrap();
        assert_eq!(title.as_str(), "第一部");
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(Title::new("   ").is_err());
        assert!(Title::new("").is_err());
    }

    #[test]
    fn test_overlong_title_rejected() {
        let long = "长".repeat(201);
        assert!(Title::new(long).is_err());
    }

    #[test]
    fn test_novel_key_roundtrip() {
        let key = NovelKey::new("-Nabc123");
        assert_eq!(key.as_str(), "-Nabc123");
        assert_eq!(key.to_string(), "-Nabc123");
    }
}
