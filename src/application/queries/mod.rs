//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：全部从投影集读取，不触发存储交互

mod novel_queries;

pub mod handlers;

pub use novel_queries::*;
