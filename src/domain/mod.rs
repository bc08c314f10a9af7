//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Novel Context: 小说记录与视图归一化
//! - Navigation Context: 界面状态机

pub mod navigation;
pub mod novel;
