//! 商品目录服务入口

use anyhow::Context;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::{info, warn};

use catalog_api::{
    app::catalog::{
        repository::InMemoryProductRepository, seed::seed_if_empty, AppState, ProductRepository,
    },
    build_router,
    config::{load_config, Config, StorageBackend},
    infrastructure::logger::Logger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config().context("加载配置失败")?;
    Logger::init(&config.logging.level);

    match &source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let repository = build_repository(&config).await?;

    if config.storage.seed_sample_data {
        seed_if_empty(repository.as_ref())
            .await
            .context("写入示例数据失败")?;
    }

    let app = build_router(
        AppState::new(repository),
        Duration::from_secs(config.http.timeout_seconds),
    );

    let listener = TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("无法绑定到 {}", config.socket_addr()))?;
    let addr = listener.local_addr()?;

    info!("🚀 商品目录服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /api/v1/catalog                      - 获取全部商品");
    info!("   GET    /api/v1/catalog/:id                  - 按 id 获取商品");
    info!("   GET    /api/v1/catalog/category/:category   - 按分类获取商品");
    info!("   POST   /api/v1/catalog                      - 创建商品");
    info!("   PUT    /api/v1/catalog                      - 更新商品");
    info!("   DELETE /api/v1/catalog/:id                  - 删除商品");
    info!("   GET    /health                              - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn ProductRepository>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("使用内存存储");
            Ok(Arc::new(InMemoryProductRepository::new()))
        }
        StorageBackend::Postgres => postgres_repository(config).await,
    }
}

#[cfg(feature = "database")]
async fn postgres_repository(config: &Config) -> anyhow::Result<Arc<dyn ProductRepository>> {
    use catalog_api::{
        app::catalog::repository::PgProductRepository, infrastructure::database::DatabaseManager,
    };

    let db = DatabaseManager::new(&config.database)
        .await
        .context("连接数据库失败")?;
    db.ensure_schema().await.context("初始化表结构失败")?;

    Ok(Arc::new(PgProductRepository::new(db.get_pool().clone())))
}

#[cfg(not(feature = "database"))]
async fn postgres_repository(_config: &Config) -> anyhow::Result<Arc<dyn ProductRepository>> {
    anyhow::bail!("未启用 database 特性，无法使用 postgres 存储")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("监听退出信号失败: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在关闭...");
}
