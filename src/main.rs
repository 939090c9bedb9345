//! 管理后台门禁服务入口

use pharmex_admin::{
    access::{AccessPolicy, AdminDirectory, PgAdminDirectory},
    auth::SessionResolver,
    config::AppConfig,
    db,
    handlers::health,
    middleware::AppState,
    routes,
    services::AdminService,
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("pharmex-admin {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 按优先级加载：.env.local > .env
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();

    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志与指标
    telemetry::init_telemetry(&config.logging);
    telemetry::init_metrics();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Admin gate starting...");

    // 3. 数据库连接池（表由托管服务维护，不执行迁移）
    let db_pool = db::create_pool(&config.database).await?;

    // 4. 构建应用状态
    let directory: Arc<dyn AdminDirectory> = Arc::new(PgAdminDirectory::new(db_pool.clone()));

    let app_state = Arc::new(AppState {
        db: db_pool,
        sessions: Arc::new(SessionResolver::from_config(&config.security)?),
        access_policy: Arc::new(AccessPolicy::standard(directory.clone())),
        admin_service: Arc::new(AdminService::new(directory)),
        config: config.clone(),
    });

    // 5. 构建路由
    let app = routes::create_router(app_state);

    // 6. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. 优雅关闭
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    // 给进行中的请求留出有限的收尾时间
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_secs(timeout_secs)).await;
        tracing::warn!("Graceful shutdown timeout reached, forcing exit");
        std::process::exit(0);
    });
}

/// 打印帮助信息
fn print_help() {
    println!("pharmex-admin {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: pharmex-admin [--version | --help]");
    println!();
    println!("Environment:");
    println!("  PHARMEX_DATABASE__URL         hosted PostgreSQL connection URL");
    println!("  PHARMEX_SECURITY__JWT_SECRET  secret used to verify session tokens");
    println!("  PHARMEX_ROUTES__SIGN_IN       redirect target for denied visitors");
}
