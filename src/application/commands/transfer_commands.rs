//! Transfer Commands - 批量导出/导入
//!
//! 常规变更路径之外的管理面，不受字段保留规则约束

/// 导出整个集合为可携带文档
#[derive(Debug, Clone)]
pub struct ExportCollection;

/// 从可携带文档整体覆盖集合
///
/// 破坏性覆盖必须由调用方显式确认
#[derive(Debug, Clone)]
pub struct ImportCollection {
    pub document: serde_json::Value,
    pub confirm_overwrite: bool,
}
