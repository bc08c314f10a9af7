//! Transfer Command Handlers - 批量导出/导入
//!
//! 常规变更路径之外的管理面。导入整体覆盖集合，likes 映射
//! 按导出原样恢复，不经过常规编辑路径的字段保留处理。

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::commands::{ExportCollection, ImportCollection};
use crate::application::error::ApplicationError;
use crate::application::ports::{CollectionStorePort, NoticePort};
use crate::domain::novel::CollectionSnapshot;

/// 当前导出文档格式版本
pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// 可携带的集合快照文档
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub format_version: u32,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub exported_at: DateTime<Utc>,

    pub novels: CollectionSnapshot,

    /// 附属集合原样携带（本系统当前只有 novels 一个集合）
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, serde_json::Value>,
}

// ============================================================================
// ExportCollection
// ============================================================================

/// ExportCollection Handler
pub struct ExportCollectionHandler {
    store: Arc<dyn CollectionStorePort>,
    notices: Arc<dyn NoticePort>,
}

impl ExportCollectionHandler {
    pub fn new(store: Arc<dyn CollectionStorePort>, notices: Arc<dyn NoticePort>) -> Self {
        Self { store, notices }
    }

    pub async fn handle(
        &self,
        _command: ExportCollection,
    ) -> Result<ExportDocument, ApplicationError> {
        match self.execute().await {
            Ok(document) => {
                self.notices.success("Collection exported");
                Ok(document)
            }
            Err(err) => {
                self.notices.error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn execute(&self) -> Result<ExportDocument, ApplicationError> {
        let novels = self
            .store
            .read_all()
            .await
            .map_err(ApplicationError::store_read)?;

        tracing::info!(records = novels.len(), "Collection exported");

        Ok(ExportDocument {
            format_version: EXPORT_FORMAT_VERSION,
            exported_at: Utc::now(),
            novels,
            extras: BTreeMap::new(),
        })
    }
}

// ============================================================================
// ImportCollection
// ============================================================================

/// 导入响应
#[derive(Debug, Clone)]
pub struct ImportCollectionResponse {
    pub imported: usize,
}

/// ImportCollection Handler
///
/// 破坏性整体覆盖，必须由调用方显式确认后才执行
pub struct ImportCollectionHandler {
    store: Arc<dyn CollectionStorePort>,
    notices: Arc<dyn NoticePort>,
}

impl ImportCollectionHandler {
    pub fn new(store: Arc<dyn CollectionStorePort>, notices: Arc<dyn NoticePort>) -> Self {
        Self { store, notices }
    }

    pub async fn handle(
        &self,
        command: ImportCollection,
    ) -> Result<ImportCollectionResponse, ApplicationError> {
        match self.execute(command).await {
            Ok(response) => {
                self.notices
                    .success(&format!("Imported {} novels", response.imported));
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
        command: ImportCollection,
    ) -> Result<ImportCollectionResponse, ApplicationError> {
        if !command.confirm_overwrite {
            return Err(ApplicationError::validation(
                "import overwrites the whole collection and requires explicit confirmation",
            ));
        }

        let document = Self::parse(command.document)?;

        self.store
            .replace_all(&document.novels)
            .await
            .map_err(ApplicationError::store_write)?;

        tracing::info!(records = document.novels.len(), "Collection imported");

        Ok(ImportCollectionResponse {
            imported: document.novels.len(),
        })
    }

    fn parse(raw: serde_json::Value) -> Result<ExportDocument, ApplicationError> {
        let object = raw
            .as_object()
            .ok_or_else(|| ApplicationError::import_format("document must be a JSON object"))?;

        for section in ["formatVersion", "novels"] {
            if !object.contains_key(section) {
                return Err(ApplicationError::import_format(format!(
                    "missing required section: {}",
                    section
                )));
            }
        }

        let document: ExportDocument = serde_json::from_value(raw)
            .map_err(|e| ApplicationError::import_format(e.to_string()))?;

        if document.format_version > EXPORT_FORMAT_VERSION {
            return Err(ApplicationError::import_format(format!(
                "unsupported format version {} (up to {} supported)",
                document.format_version, EXPORT_FORMAT_VERSION
            )));
        }

        Ok(document)
    }
}
