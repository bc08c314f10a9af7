//! Worker Layer - 后台任务

mod sync_worker;

pub use sync_worker::SyncWorker;
