//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod events;
pub mod memory;
pub mod worker;

pub use adapters::{
    HttpCollectionStore, HttpCollectionStoreConfig, HttpImageHost, HttpImageHostConfig,
};
pub use events::BroadcastNoticePublisher;
pub use memory::{
    InMemoryClipboard, InMemoryCollectionStore, InMemoryImageHost, StaticIdentityProvider,
};
pub use worker::SyncWorker;
