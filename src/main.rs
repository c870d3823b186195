use anyhow::Context;
use item_api::infrastructure::{config, logger};
use item_api::{build_router, AppState, ItemStore};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化配置系统
    let (config, source) = config::load_config().context("加载配置失败")?;

    // 初始化日志系统
    let _guard = logger::init_logging(&config.logging).context("初始化日志失败")?;

    match source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }
    info!("启动 Item API 服务器...");

    let state = AppState::new(ItemStore::new());
    let app = build_router(state, &config.http);

    let addr = config.http.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 Item API 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /              - 欢迎信息");
    info!("   GET    /health        - 健康检查");
    info!("   GET    /info          - API 信息");
    info!("   GET    /items         - 获取所有商品");
    info!("   POST   /items         - 创建新商品");
    info!("   GET    /items/:id     - 获取特定商品");
    info!("   PUT    /items/:id     - 更新商品");
    info!("   DELETE /items/:id     - 删除商品");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已安全关闭");
    Ok(())
}

/// 等待 Ctrl+C
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("收到停止信号，正在关闭服务器..."),
        Err(e) => {
            warn!("无法监听停止信号: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
