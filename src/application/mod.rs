//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（CollectionStore、IdentityProvider、ImageHost、Clipboard、Notice）
//! - commands: CQRS 命令及处理器（变更协调器）
//! - queries: CQRS 查询及处理器（投影集读取）
//! - projection: 投影集（全量、归一化、已排序的视图记录）
//! - navigator: 跨任务共享的界面状态
//! - share: 分享链接构造与入口解析
//! - context: 会话上下文
//! - error: 应用层错误定义

pub mod commands;
pub mod context;
pub mod error;
pub mod navigator;
pub mod ports;
pub mod projection;
pub mod queries;
pub mod share;

// Re-exports
pub use commands::{
    // Like commands
    ToggleLike,
    // Novel commands
    DeleteNovel,
    PublishNovel,
    ShareNovel,
    UploadCoverImage,
    // Transfer commands
    ExportCollection,
    ImportCollection,
    // Handlers
    handlers::{
        DeleteNovelHandler, ExportCollectionHandler, ExportDocument, ImportCollectionHandler,
        ImportCollectionResponse, PublishNovelHandler, PublishNovelResponse, ShareNovelHandler,
        ShareNovelResponse, ToggleLikeHandler, ToggleLikeResponse, UploadCoverHandler,
        UploadCoverResponse, EXPORT_FORMAT_VERSION,
    },
};

pub use context::SessionContext;
pub use error::ApplicationError;
pub use navigator::{Navigator, Reconciliation};
pub use projection::NovelProjection;
pub use share::{extract_share_token, ShareLinkBuilder, ShareResolver, SHARE_QUERY_KEY};

pub use ports::{
    // Clipboard
    ClipboardPort,
    // Collection store
    CollectionStorePort,
    StoreError,
    // Identity provider
    IdentityProviderPort,
    Viewer,
    // Image host
    ImageHostError,
    ImageHostPort,
    MAX_IMAGE_BYTES,
    // Notices
    Notice,
    NoticePort,
};

pub use queries::{
    // Novel queries
    BrowseNovels,
    GetNovel,
    MyNovels,
    // Handlers
    handlers::{BrowseNovelsHandler, GetNovelHandler, MyNovelsHandler},
};
