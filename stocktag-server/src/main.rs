use stocktag_server::{print_banner, setup_environment, Config, Server, ServerState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env 与配置
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. 设置环境 (工作目录, 日志)
    setup_environment(&config)?;

    // 打印横幅
    print_banner();

    tracing::info!("📦 StockTag server starting...");

    // 3. 初始化服务器状态 (数据库、打印队列)
    let (state, print_rx) = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器 (Server::run 会自动启动后台任务)
    let server = Server::with_state(config, state, print_rx);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
