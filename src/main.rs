//! Noverse - 小说分享应用的视图同步与变更协调引擎
//!
//! 无头会话入口：装配适配器与会话上下文，解析一次入口地址，
//! 启动同步循环直到收到退出信号。界面渲染由宿主负责。

use std::sync::Arc;

use noverse::application::ports::CollectionStorePort;
use noverse::application::{Navigator, NovelProjection, SessionContext, ShareLinkBuilder};
use noverse::config::{load_config, print_config};
use noverse::infrastructure::{
    BroadcastNoticePublisher, HttpCollectionStore, HttpCollectionStoreConfig, HttpImageHost,
    HttpImageHostConfig, InMemoryClipboard, StaticIdentityProvider, SyncWorker,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},noverse={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Noverse - 视图同步与变更协调引擎");
    print_config(&config);

    // 创建存储适配器并启动订阅轮询
    let store_config = HttpCollectionStoreConfig {
        base_url: config.store.base_url.clone(),
        collection: config.store.collection.clone(),
        timeout_secs: config.store.timeout_secs,
        poll_interval_ms: config.store.poll_interval_ms,
    };
    let store = Arc::new(
        HttpCollectionStore::new(store_config)
            .map_err(|e| anyhow::anyhow!("Failed to create store client: {}", e))?,
    );
    store.clone().spawn_poller();

    // 创建图床适配器
    let image_config = HttpImageHostConfig {
        upload_url: config.image_host.upload_url.clone(),
        timeout_secs: config.image_host.timeout_secs,
    };
    let image_host = Arc::new(
        HttpImageHost::new(image_config)
            .map_err(|e| anyhow::anyhow!("Failed to create image host client: {}", e))?,
    );

    // 身份与剪贴板由宿主环境接管；无头会话以匿名身份运行
    let identity = StaticIdentityProvider::anonymous().arc();
    let clipboard = InMemoryClipboard::new().arc();
    let notices = BroadcastNoticePublisher::new().arc();

    // 共享状态
    let projection = NovelProjection::new().arc();
    let navigator = Navigator::new().arc();

    // 会话上下文
    let context = SessionContext::new(
        store.clone() as Arc<dyn CollectionStorePort>,
        identity.clone(),
        image_host,
        clipboard,
        notices.clone(),
        projection.clone(),
        navigator.clone(),
        ShareLinkBuilder::new(config.share.base_url.clone()),
    );

    // 入口地址分享解析（仅初始加载这一次）
    if let Some(address) = &config.share.entry_address {
        context.share_resolver.resolve_entry(address).await;
    }

    // 通知流记入日志（toast 呈现由宿主界面负责）
    let mut notice_rx = notices.subscribe();
    tokio::spawn(async move {
        while let Ok(notice) = notice_rx.recv().await {
            tracing::info!(notice = ?notice, "Notice");
        }
    });

    // 启动同步循环
    let worker = SyncWorker::new(
        context.store.clone(),
        context.identity.clone(),
        projection,
        navigator,
        context.notices.clone(),
    );
    tokio::spawn(worker.run());

    tracing::info!("Session started");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Received shutdown signal");

    Ok(())
}
