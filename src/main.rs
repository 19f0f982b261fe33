use product_service::{
    app::{create_router, AppState},
    config::Config,
    infrastructure::{database::DatabaseManager, logger::Logger},
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("服务启动失败: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // 配置错误在日志初始化之前发生，只能写到 stderr
    let config = Config::load()?;
    Logger::init(&config.logging.level)?;

    info!("启动产品服务...");

    let database = DatabaseManager::new(&config.database).await.map_err(|e| {
        error!("数据库初始化失败: {}", e);
        e
    })?;

    let state = AppState::new(database.into_pool());
    let app = create_router(state, config.http.request_timeout());

    let listener = TcpListener::bind(config.http.socket_addr()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 产品服务运行在 http://{}", addr);
    info!("   GET /select                        - 列出全部产品");
    info!("   GET /insert?id=ID&product_name=NAME - 插入产品");
    info!("   GET /update?id=ID&product_name=NAME - 更新产品名称");
    info!("   GET /delete?id=ID                  - 删除产品");
    info!("   GET /deleteAll                     - 删除全部产品");
    info!("   GET /health                        - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("监听关闭信号失败: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到关闭信号，正在停止服务...");
}
