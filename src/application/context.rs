//! Session Context - 会话上下文
//!
//! 进程级的配置与句柄显式注入各组件（不做环境单例）。
//! 会话开始时创建一次，会话结束时随进程销毁。

use std::sync::Arc;

use crate::application::commands::handlers::{
    DeleteNovelHandler, ExportCollectionHandler, ImportCollectionHandler, PublishNovelHandler,
    ShareNovelHandler, ToggleLikeHandler, UploadCoverHandler,
};
use crate::application::navigator::Navigator;
use crate::application::ports::{
    ClipboardPort, CollectionStorePort, IdentityProviderPort, ImageHostPort, NoticePort,
};
use crate::application::projection::NovelProjection;
use crate::application::queries::handlers::{
    BrowseNovelsHandler, GetNovelHandler, MyNovelsHandler,
};
use crate::application::share::{ShareLinkBuilder, ShareResolver};

/// 会话上下文
pub struct SessionContext {
    // ========== Ports ==========
    pub store: Arc<dyn CollectionStorePort>,
    pub identity: Arc<dyn IdentityProviderPort>,
    pub image_host: Arc<dyn ImageHostPort>,
    pub clipboard: Arc<dyn ClipboardPort>,
    pub notices: Arc<dyn NoticePort>,

    // ========== 共享状态 ==========
    pub projection: Arc<NovelProjection>,
    pub navigator: Arc<Navigator>,

    // ========== Command Handlers ==========
    pub publish_novel_handler: PublishNovelHandler,
    pub delete_novel_handler: DeleteNovelHandler,
    pub toggle_like_handler: ToggleLikeHandler,
    pub share_novel_handler: ShareNovelHandler,
    pub upload_cover_handler: UploadCoverHandler,
    pub export_handler: ExportCollectionHandler,
    pub import_handler: ImportCollectionHandler,

    // ========== Query Handlers ==========
    pub browse_novels_handler: BrowseNovelsHandler,
    pub get_novel_handler: GetNovelHandler,
    pub my_novels_handler: MyNovelsHandler,

    // ========== Share Resolution ==========
    pub share_resolver: ShareResolver,
}

impl SessionContext {
    pub fn new(
        store: Arc<dyn CollectionStorePort>,
        identity: Arc<dyn IdentityProviderPort>,
        image_host: Arc<dyn ImageHostPort>,
        clipboard: Arc<dyn ClipboardPort>,
        notices: Arc<dyn NoticePort>,
        projection: Arc<NovelProjection>,
        navigator: Arc<Navigator>,
        share_links: ShareLinkBuilder,
    ) -> Self {
        Self {
            // Command handlers
            publish_novel_handler: PublishNovelHandler::new(
                store.clone(),
                identity.clone(),
                navigator.clone(),
                notices.clone(),
            ),
            delete_novel_handler: DeleteNovelHandler::new(
                store.clone(),
                identity.clone(),
                notices.clone(),
            ),
            toggle_like_handler: ToggleLikeHandler::new(
                store.clone(),
                identity.clone(),
                projection.clone(),
                notices.clone(),
            ),
            share_novel_handler: ShareNovelHandler::new(
                share_links,
                clipboard.clone(),
                notices.clone(),
            ),
            upload_cover_handler: UploadCoverHandler::new(image_host.clone(), notices.clone()),
            export_handler: ExportCollectionHandler::new(store.clone(), notices.clone()),
            import_handler: ImportCollectionHandler::new(store.clone(), notices.clone()),

            // Query handlers
            browse_novels_handler: BrowseNovelsHandler::new(projection.clone()),
            get_novel_handler: GetNovelHandler::new(projection.clone()),
            my_novels_handler: MyNovelsHandler::new(projection.clone(), identity.clone()),

            // Share resolution
            share_resolver: ShareResolver::new(store.clone(), navigator.clone(), notices.clone()),

            // Ports
            store,
            identity,
            image_host,
            clipboard,
            notices,

            // 共享状态
            projection,
            navigator,
        }
    }
}
