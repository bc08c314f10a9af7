//! Noverse - 小说分享应用的视图同步与变更协调引擎
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Novel Context: 存储记录、视图归一化、草稿校验
//! - Navigation Context: 界面状态机
//!
//! 应用层 (application/):
//! - Ports: 端口定义（CollectionStore, IdentityProvider, ImageHost, Clipboard, Notice）
//! - Commands: CQRS 命令处理器（发布/编辑、删除、点赞、分享、封面、导出/导入）
//! - Queries: CQRS 查询处理器（浏览/过滤、单本、我的小说）
//! - Projection: 全量归一化投影集
//! - Navigator: 跨任务共享的界面状态
//! - Share: 分享链接构造与入口解析
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP 集合存储、HTTP 图床
//! - Memory: 内存端口实现（测试与演示）
//! - Events: 广播通知发布
//! - Worker: SyncWorker 会话同步循环

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
