//! Events Layer - 通知发布

mod publisher;

pub use publisher::BroadcastNoticePublisher;
